//! `site/*` endpoints.

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::client::TaginfoClient;
use crate::error::{SchemaViolation, TaginfoError};
use crate::response::schema::positive;
use crate::response::Validate;

/// Background map used for distribution charts.
///
/// Returned as a bare object, without the usual envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfigGeodistribution {
    /// Width of the background image.
    pub width: u32,
    /// Height of the background image.
    pub height: u32,
    /// Scale factor for images.
    pub scale_image: f64,
    /// Scale factor for comparison images.
    pub scale_compare_image: f64,
    /// URL of the background image.
    pub background_image: String,
    /// Map attribution for the comparison background.
    pub image_attribution: String,
}

impl Validate for SiteConfigGeodistribution {
    fn validate(&self) -> Result<(), SchemaViolation> {
        if self.width == 0 {
            return Err(SchemaViolation::new("width", "must be > 0"));
        }
        if self.height == 0 {
            return Err(SchemaViolation::new("height", "must be > 0"));
        }
        positive("scale_image", self.scale_image)?;
        positive("scale_compare_image", self.scale_compare_image)
    }
}

impl TaginfoClient {
    /// Gets information about the background map for distribution charts.
    ///
    /// ## Errors
    ///
    /// See [`TaginfoClient::execute`].
    pub async fn site_config_geodistribution(
        &self,
    ) -> Result<SiteConfigGeodistribution, TaginfoError> {
        self.execute(&catalog::SITE_CONFIG_GEODISTRIBUTION, &()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(width: u32, scale: f64) -> SiteConfigGeodistribution {
        SiteConfigGeodistribution {
            width,
            height: 180,
            scale_image: scale,
            scale_compare_image: 1.0,
            background_image: "/img/mapbg/world.png".to_string(),
            image_attribution: "OpenStreetMap contributors".to_string(),
        }
    }

    #[test]
    fn test_constraints() {
        assert!(config(360, 2.0).validate().is_ok());
        assert_eq!(config(0, 2.0).validate().unwrap_err().field(), "width");
        assert_eq!(config(360, 0.0).validate().unwrap_err().field(), "scale_image");
        assert_eq!(config(360, f64::NAN).validate().unwrap_err().field(), "scale_image");
    }

    #[test]
    fn test_negative_width_rejected() {
        let raw = r#"{
            "width": -360, "height": 180, "scale_image": 2, "scale_compare_image": 1,
            "background_image": "/img/mapbg/world.png", "image_attribution": ""
        }"#;
        assert!(serde_json::from_str::<SiteConfigGeodistribution>(raw).is_err());
    }
}
