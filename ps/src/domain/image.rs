//! Destination imagery

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// Number of images every result carries
pub const IMAGE_SET_SIZE: usize = 5;

/// 1x1 transparent PNG standing in for an image that could not be produced
pub const PLACEHOLDER_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResource {
    pub id: String,
    /// Data URI or URL
    pub source_data: String,
    pub alt_text: String,
    #[serde(default)]
    pub is_placeholder: bool,
}

impl ImageResource {
    pub fn new(source_data: impl Into<String>, alt_text: impl Into<String>) -> Self {
        Self {
            id: generate_id("image", ""),
            source_data: source_data.into(),
            alt_text: alt_text.into(),
            is_placeholder: false,
        }
    }

    /// The placeholder sentinel for slot `index` (0-based)
    pub fn placeholder(destination: &str, index: usize) -> Self {
        Self {
            id: generate_id("image", ""),
            source_data: PLACEHOLDER_DATA_URI.to_string(),
            alt_text: format!("Placeholder image {} for {}", index + 1, destination),
            is_placeholder: true,
        }
    }
}

/// Exactly [`IMAGE_SET_SIZE`] images, real ones first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSet([ImageResource; IMAGE_SET_SIZE]);

impl ImageSet {
    /// Fill the set from whatever the image collaborator produced
    ///
    /// Extra images are dropped; missing slots become placeholders.
    pub fn padded(destination: &str, produced: Vec<ImageResource>) -> Self {
        let mut produced = produced.into_iter();
        Self(std::array::from_fn(|index| {
            produced
                .next()
                .unwrap_or_else(|| ImageResource::placeholder(destination, index))
        }))
    }

    /// A set made only of placeholders
    pub fn placeholders(destination: &str) -> Self {
        Self::padded(destination, Vec::new())
    }

    pub fn as_slice(&self) -> &[ImageResource] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ImageResource> {
        self.0.iter()
    }

    /// Number of real (non-placeholder) images
    pub fn real_count(&self) -> usize {
        self.0.iter().filter(|image| !image.is_placeholder).count()
    }
}

impl<'a> IntoIterator for &'a ImageSet {
    type Item = &'a ImageResource;
    type IntoIter = std::slice::Iter<'a, ImageResource>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn real(n: usize) -> Vec<ImageResource> {
        (0..n)
            .map(|i| ImageResource::new(format!("https://img.example/{i}.png"), format!("Image {i}")))
            .collect()
    }

    #[test]
    fn test_padded_always_has_five() {
        for produced in 0..=IMAGE_SET_SIZE {
            let set = ImageSet::padded("Rome", real(produced));
            assert_eq!(set.as_slice().len(), IMAGE_SET_SIZE);
            assert_eq!(set.real_count(), produced);
        }
    }

    #[test]
    fn test_padded_keeps_real_images_first() {
        let set = ImageSet::padded("Rome", real(2));
        assert!(!set.as_slice()[0].is_placeholder);
        assert_eq!(set.as_slice()[1].alt_text, "Image 1");
        assert!(set.as_slice()[2].is_placeholder);
        assert_eq!(set.as_slice()[4].source_data, PLACEHOLDER_DATA_URI);
        assert_eq!(set.as_slice()[4].alt_text, "Placeholder image 5 for Rome");
    }

    #[test]
    fn test_padded_drops_extras() {
        let set = ImageSet::padded("Rome", real(7));
        assert_eq!(set.real_count(), IMAGE_SET_SIZE);
        assert_eq!(set.as_slice()[4].alt_text, "Image 4");
    }

    #[test]
    fn test_placeholder_ids_are_unique() {
        let set = ImageSet::placeholders("Rome");
        let ids: std::collections::HashSet<_> = set.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids.len(), IMAGE_SET_SIZE);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let json = serde_json::to_value(ImageSet::placeholders("Rome")).unwrap();
        assert_eq!(json.as_array().unwrap().len(), IMAGE_SET_SIZE);
        assert_eq!(json[0]["isPlaceholder"], true);
    }
}
