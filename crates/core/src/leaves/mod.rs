use serde::Deserialize;

use crate::gesture::SwingDirection;
use crate::render::SvgDocument;
use crate::{DopplerError, Result};

/// Rotation applied to a leaf for one swing direction: an angle in degrees
/// about the pivot `(cx, cy)`. Serialized in the geometry document as the
/// array `[angle, cx, cy]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "(f32, f32, f32)")]
pub struct RotateParams {
    pub angle: f32,
    pub cx: f32,
    pub cy: f32,
}

impl From<(f32, f32, f32)> for RotateParams {
    fn from((angle, cx, cy): (f32, f32, f32)) -> Self {
        Self { angle, cx, cy }
    }
}

/// One entry of the leaf geometry document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafDescriptor {
    pub id: String,
    pub left_rotate_params: RotateParams,
    pub right_rotate_params: RotateParams,
}

/// A leaf with its rendering handle attached. Immutable after load.
#[derive(Debug)]
pub struct Leaf<H> {
    pub id: String,
    pub left_rotate_params: RotateParams,
    pub right_rotate_params: RotateParams,
    pub handle: H,
}

impl<H> Leaf<H> {
    /// Picks the rotation for the requested swing direction.
    pub fn rotate_params(&self, direction: SwingDirection) -> RotateParams {
        match direction {
            SwingDirection::Left => self.left_rotate_params,
            SwingDirection::Right => self.right_rotate_params,
        }
    }
}

/// The set of animatable leaves, populated exactly once during
/// initialization and never resized afterwards.
#[derive(Debug)]
pub struct LeafRegistry<H> {
    leaves: Vec<Leaf<H>>,
}

impl<H> LeafRegistry<H> {
    /// Parses the leaf geometry document and resolves a rendering handle for
    /// every entry. There is no partial success: a parse error or a missing
    /// element fails the whole load and no registry is produced.
    pub fn load<D>(document: &D, data: &str) -> Result<Self>
    where
        D: SvgDocument<Handle = H>,
    {
        let descriptors: Vec<LeafDescriptor> = serde_json::from_str(data)?;
        let leaves = descriptors
            .into_iter()
            .map(|descriptor| {
                let handle = document
                    .select(&descriptor.id)
                    .ok_or_else(|| DopplerError::MissingElement(descriptor.id.clone()))?;
                Ok(Leaf {
                    id: descriptor.id,
                    left_rotate_params: descriptor.left_rotate_params,
                    right_rotate_params: descriptor.right_rotate_params,
                    handle,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { leaves })
    }

    /// Read-only view of the loaded leaves.
    pub fn leaves(&self) -> &[Leaf<H>] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::headless::HeadlessDocument;

    const DATA: &str = r##"[
        {"id": "#leaf1", "leftRotateParams": [-18, 120, 40], "rightRotateParams": [18, 120, 40]},
        {"id": "#leaf2", "leftRotateParams": [-12, 90, 64], "rightRotateParams": [12, 90, 64]}
    ]"##;

    #[test]
    fn loads_and_resolves_every_descriptor() {
        let document = HeadlessDocument::with_elements(["#leaf1", "#leaf2"]);
        let registry = LeafRegistry::load(&document, DATA).unwrap();

        assert_eq!(registry.len(), 2);
        let leaf = &registry.leaves()[0];
        assert_eq!(leaf.id, "#leaf1");
        assert_eq!(
            leaf.rotate_params(SwingDirection::Left),
            RotateParams::from((-18.0, 120.0, 40.0))
        );
        assert_eq!(
            leaf.rotate_params(SwingDirection::Right),
            RotateParams::from((18.0, 120.0, 40.0))
        );
    }

    #[test]
    fn missing_elements_fail_the_whole_load() {
        let document = HeadlessDocument::with_elements(["#leaf1"]);
        let err = LeafRegistry::load(&document, DATA).unwrap_err();
        assert!(matches!(err, DopplerError::MissingElement(id) if id == "#leaf2"));
    }

    #[test]
    fn malformed_data_fails_the_load() {
        let document = HeadlessDocument::with_elements(["#leaf1"]);
        assert!(LeafRegistry::load(&document, "not json").is_err());
    }
}
