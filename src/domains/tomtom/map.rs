//! Static map images.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::{TomTomApi, api_version};
use super::error::{TomTomError, TomTomResult};
use super::geo::{BoundingBox, Coordinate};
use super::guards;
use super::params::{ParamMap, format_number};
use super::request::fetch_binary;

pub const DEFAULT_WIDTH: f64 = 512.0;
pub const DEFAULT_HEIGHT: f64 = 512.0;
pub const DEFAULT_ZOOM: f64 = 12.0;
pub const DEFAULT_VIEW: &str = "Unified";
pub const DEFAULT_CONTENT_TYPE: &str = "image/png";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MapStyle {
    /// Default daytime style
    #[default]
    Main,
    /// Dark theme
    Night,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MapLayer {
    /// Streets
    #[default]
    Basic,
    /// Text only, transparent background
    Labels,
    /// Satellite imagery with labels
    Hybrid,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpg,
}

impl MapStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Night => "night",
        }
    }
}

impl MapLayer {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Labels => "labels",
            Self::Hybrid => "hybrid",
        }
    }
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpg => "jpg",
        }
    }
}

/// Static map request. Either `center` (with `zoom`) or `bbox` frames the map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StaticMapOptions {
    /// Map center coordinates. Use results from geocoding or search operations.
    pub center: Option<Coordinate>,
    /// Bounding box as [west, south, east, north]. Alternative to center+zoom.
    pub bbox: Option<Vec<f64>>,
    /// Zoom level (0-22). Examples: 3 (continent), 10 (city), 18 (street). Default: 12.
    pub zoom: Option<f64>,
    /// Width in pixels (1-8192). Default: 512.
    pub width: Option<f64>,
    /// Height in pixels (1-8192). Default: 512.
    pub height: Option<f64>,
    /// 'main' (default) or 'night'.
    pub style: Option<MapStyle>,
    /// 'basic' (default), 'labels' or 'hybrid'.
    pub layer: Option<MapLayer>,
    /// 'png' (default) or 'jpg'.
    pub format: Option<ImageFormat>,
    /// Geopolitical view, e.g. 'Unified' (default), 'IN', 'CN'.
    pub view: Option<String>,
    /// Language for map labels (IETF tag).
    pub language: Option<String>,
}

/// How the map is positioned, after validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapFrame {
    Center { center: Coordinate, zoom: f64 },
    Bounds(BoundingBox),
}

/// Validates size and framing. `center` wins when both are given.
pub fn resolve_frame(options: &StaticMapOptions) -> TomTomResult<MapFrame> {
    guards::check_dimension("Width", options.width.unwrap_or(DEFAULT_WIDTH))?;
    guards::check_dimension("Height", options.height.unwrap_or(DEFAULT_HEIGHT))?;
    if let Some(zoom) = options.zoom {
        guards::check_zoom(zoom)?;
    }

    if let Some(center) = options.center {
        guards::check_coordinate(&center, "Center")?;
        let zoom = options.zoom.unwrap_or(DEFAULT_ZOOM);
        return Ok(MapFrame::Center { center, zoom });
    }
    if let Some(bbox) = &options.bbox {
        return guards::check_bbox(bbox).map(MapFrame::Bounds);
    }
    Err(TomTomError::validation(
        "Either center coordinates or bounding box must be provided",
    ))
}

/// Image parameters for an already validated frame.
pub fn build_static_map_params(frame: &MapFrame, options: &StaticMapOptions) -> ParamMap {
    let mut params = ParamMap::new();
    match frame {
        MapFrame::Center { center, zoom } => {
            params.insert("center", center.lon_lat());
            params.insert("zoom", format_number(*zoom));
        }
        MapFrame::Bounds(bbox) => params.insert("bbox", bbox.to_string()),
    }
    params.insert("format", options.format.unwrap_or_default().as_str());
    params.insert("layer", options.layer.unwrap_or_default().as_str());
    params.insert("style", options.style.unwrap_or_default().as_str());
    params.insert("width", options.width.unwrap_or(DEFAULT_WIDTH));
    params.insert("height", options.height.unwrap_or(DEFAULT_HEIGHT));
    params.insert("view", options.view.as_deref().unwrap_or(DEFAULT_VIEW));
    if let Some(language) = &options.language {
        params.insert("language", language.as_str());
    }
    params
}

/// Rendered map image.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticMapImage {
    pub base64: String,
    pub content_type: String,
}

pub async fn get_static_map(
    api: &dyn TomTomApi,
    options: &StaticMapOptions,
) -> TomTomResult<StaticMapImage> {
    let frame = resolve_frame(options)?;
    let params = build_static_map_params(&frame, options);
    debug!("Generating static map with {:?}", frame);

    let path = format!("/map/{}/staticimage", api_version::MAP);
    let image = fetch_binary(api, &path, &params, "static map").await?;
    debug!("Downloaded static map image ({:.2} KB)", image.bytes.len() as f64 / 1024.0);

    Ok(StaticMapImage {
        base64: STANDARD.encode(&image.bytes),
        content_type: image
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tomtom::client::{Binary, TransportFailure};
    use crate::domains::tomtom::error::ErrorKind;
    use crate::domains::tomtom::mock::{MockApi, Scripted};
    use crate::domains::tomtom::params::ParamValue;

    fn centered(zoom: Option<f64>) -> StaticMapOptions {
        StaticMapOptions {
            center: Some(Coordinate::new(52.3731, 4.8922)),
            zoom,
            ..StaticMapOptions::default()
        }
    }

    #[test]
    fn test_center_params_in_lon_lat_order() {
        let options = centered(None);
        let frame = resolve_frame(&options).unwrap();
        let params = build_static_map_params(&frame, &options);
        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("center".to_string(), "4.8922,52.3731".to_string()),
                ("zoom".to_string(), "12".to_string()),
                ("format".to_string(), "png".to_string()),
                ("layer".to_string(), "basic".to_string()),
                ("style".to_string(), "main".to_string()),
                ("width".to_string(), "512".to_string()),
                ("height".to_string(), "512".to_string()),
                ("view".to_string(), "Unified".to_string()),
            ]
        );
    }

    #[test]
    fn test_zoom_zero_is_kept() {
        let options = centered(Some(0.0));
        let frame = resolve_frame(&options).unwrap();
        let params = build_static_map_params(&frame, &options);
        assert_eq!(params.get("zoom"), Some(&ParamValue::Text("0".to_string())));
    }

    #[test]
    fn test_bbox_frame() {
        let options = StaticMapOptions {
            bbox: Some(vec![-122.42, 37.77, -122.40, 37.79]),
            style: Some(MapStyle::Night),
            language: Some("nl-NL".into()),
            ..StaticMapOptions::default()
        };
        let frame = resolve_frame(&options).unwrap();
        let params = build_static_map_params(&frame, &options);
        assert_eq!(
            params.get("bbox").map(ParamValue::render),
            Some("-122.42,37.77,-122.4,37.79".to_string())
        );
        assert!(!params.contains_key("zoom"));
        assert_eq!(params.get("style").map(ParamValue::render), Some("night".to_string()));
        assert_eq!(params.get("language").map(ParamValue::render), Some("nl-NL".to_string()));
    }

    #[test]
    fn test_zoom_checked_for_bbox_frame() {
        let options = StaticMapOptions {
            bbox: Some(vec![4.8, 52.3, 5.0, 52.4]),
            zoom: Some(25.0),
            ..StaticMapOptions::default()
        };
        let err = resolve_frame(&options).unwrap_err();
        assert!(err.to_string().contains("between 0 and 22"));
    }

    #[test]
    fn test_guards() {
        let err = resolve_frame(&centered(Some(25.0))).unwrap_err();
        assert!(err.to_string().contains("between 0 and 22"));

        let options = StaticMapOptions {
            width: Some(10000.0),
            ..centered(None)
        };
        assert!(resolve_frame(&options).unwrap_err().to_string().contains("between 1 and 8192"));

        let err = resolve_frame(&StaticMapOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Either center coordinates or bounding box must be provided"
        );
    }

    #[test]
    fn test_enums_deserialize_lowercase() {
        let options: StaticMapOptions = serde_json::from_value(serde_json::json!({
            "center": {"lat": 1.0, "lon": 2.0},
            "layer": "hybrid",
            "format": "jpg"
        }))
        .unwrap();
        assert_eq!(options.layer, Some(MapLayer::Hybrid));
        assert_eq!(options.format, Some(ImageFormat::Jpg));
    }

    #[tokio::test]
    async fn test_image_is_base64_encoded() {
        let api = MockApi::new(vec![Scripted::Binary(Binary {
            bytes: vec![0x89, b'P', b'N', b'G'],
            content_type: None,
        })]);
        let image = get_static_map(&api, &centered(Some(15.0))).await.unwrap();
        assert_eq!(image.base64, "iVBORw==");
        assert_eq!(image.content_type, "image/png");
        assert_eq!(api.last_call().unwrap().path, "/map/1/staticimage");
    }

    #[tokio::test]
    async fn test_failures_are_classified() {
        let api = MockApi::failing(TransportFailure::Status {
            status: 403,
            body: String::new(),
        });
        let err = get_static_map(&api, &centered(None)).await.unwrap_err();
        assert_eq!(err.as_api().unwrap().kind, ErrorKind::Auth);
    }
}
