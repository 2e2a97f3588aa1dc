//! Codec implementations and factory

use crate::channel::{Channel, ChannelConfig};
use crate::error::Result;
use crate::types::{AudioCodec, CodecConfig, CodecType};
use tracing::debug;

// Codec implementations
#[cfg(feature = "g711")]
pub mod g711;

pub mod celp;
pub mod l16;

/// Codec factory for creating codec instances
pub struct CodecFactory;

impl CodecFactory {
    /// Create a codec instance from configuration
    ///
    /// CELP codecs are returned as an open [`Channel`].
    pub fn create(config: CodecConfig) -> Result<Box<dyn AudioCodec>> {
        // Validate configuration first
        config.validate()?;
        debug!(codec = %config.codec_type, "Creating codec");

        match config.codec_type {
            #[cfg(feature = "g711")]
            CodecType::Pcmu => Ok(Box::new(g711::G711Codec::new_pcmu())),

            #[cfg(feature = "g711")]
            CodecType::Pcma => Ok(Box::new(g711::G711Codec::new_pcma())),

            #[cfg(not(feature = "g711"))]
            CodecType::Pcmu | CodecType::Pcma => {
                Err(crate::error::CodecError::feature_not_enabled("g711"))
            }

            CodecType::L16 => Ok(Box::new(l16::L16Codec::new(config.byte_order))),

            CodecType::Celp8k => {
                let channel = Channel::with_config(ChannelConfig::from(&config))?;
                Ok(Box::new(channel))
            }
        }
    }

    /// Create a codec by name
    pub fn create_by_name(name: &str, config: CodecConfig) -> Result<Box<dyn AudioCodec>> {
        let codec_type = CodecType::from_name(name)?;
        Self::create(CodecConfig { codec_type, ..config })
    }

    /// Get all supported codec names
    pub fn supported_codecs() -> Vec<&'static str> {
        crate::SUPPORTED_CODECS.to_vec()
    }

    /// Check if a codec is supported
    pub fn is_supported(name: &str) -> bool {
        Self::supported_codecs().contains(&name.to_uppercase().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_factory_creates_every_codec() {
        for config in [CodecConfig::l16(), CodecConfig::celp8k()] {
            let codec = CodecFactory::create(config.clone()).unwrap();
            assert_eq!(codec.info().name, config.codec_type.name());
        }

        #[cfg(feature = "g711")]
        {
            assert_eq!(CodecFactory::create(CodecConfig::pcmu()).unwrap().info().name, "PCMU");
            assert_eq!(CodecFactory::create(CodecConfig::pcma()).unwrap().info().name, "PCMA");
        }
    }

    #[cfg(not(feature = "g711"))]
    #[test]
    fn test_g711_requires_feature() {
        assert!(matches!(
            CodecFactory::create(CodecConfig::pcmu()),
            Err(CodecError::FeatureNotEnabled { .. })
        ));
        assert!(matches!(
            CodecFactory::create(CodecConfig::pcma()),
            Err(CodecError::FeatureNotEnabled { .. })
        ));
    }

    #[test]
    fn test_factory_validates_config() {
        let config = CodecConfig::celp8k().with_conceal_mute_after(0);
        assert!(matches!(CodecFactory::create(config), Err(CodecError::InvalidConfig { .. })));
    }

    #[test]
    fn test_create_by_name() {
        let mut codec = CodecFactory::create_by_name("celp8k", CodecConfig::default()).unwrap();
        let encoded = codec.encode(&[0i16; 80]).unwrap();
        assert_eq!(encoded.len(), 10);
        assert!(CodecFactory::create_by_name("G729", CodecConfig::default()).is_err());
    }

    #[test]
    fn test_supported_codecs() {
        assert!(CodecFactory::is_supported("celp8k"));
        assert!(CodecFactory::is_supported("L16"));
        assert!(!CodecFactory::is_supported("opus"));
    }
}
