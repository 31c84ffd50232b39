use std::time::Duration;

use crate::gesture::SwingDirection;
use crate::leaves::Leaf;
use crate::render::{Easing, LeafHandle};
use crate::Result;

/// Length of each animation phase. A full swing is two phases: deflect to
/// the rotated transform, then return to the captured origin.
pub const SWING_DURATION: Duration = Duration::from_millis(500);

/// Runs one complete swing for a single leaf.
///
/// The leaf's current transform is captured as the origin; the target is a
/// copy of it with the direction's rotation applied about the leaf's pivot.
/// The two phases are strictly sequential and the future resolves only once
/// both have completed, so the leaf ends exactly where it started. There is
/// no cancellation: once started, a swing always runs to completion.
pub async fn swing<H: LeafHandle>(leaf: &Leaf<H>, direction: SwingDirection) -> Result<()> {
    let origin = leaf.handle.transform();
    let params = leaf.rotate_params(direction);

    let mut target = origin;
    target.rotate(params.angle, params.cx, params.cy);

    leaf.handle
        .animate(target, SWING_DURATION, Easing::Linear)
        .await?;
    leaf.handle
        .animate(origin, SWING_DURATION, Easing::Linear)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leaves::{LeafRegistry, RotateParams};
    use crate::render::headless::HeadlessDocument;
    use crate::render::{Matrix, SvgDocument};

    const DATA: &str = r##"[
        {"id": "#leaf1", "leftRotateParams": [-18, 120, 40], "rightRotateParams": [18, 120, 40]}
    ]"##;

    #[tokio::test(start_paused = true)]
    async fn swing_deflects_then_returns_to_the_origin() {
        let document = HeadlessDocument::with_elements(["#leaf1"]);
        let registry = LeafRegistry::load(&document, DATA).unwrap();
        let leaf = &registry.leaves()[0];
        let origin = leaf.handle.transform();

        swing(leaf, SwingDirection::Left).await.unwrap();

        let calls = document.select("#leaf1").unwrap().calls();
        assert_eq!(calls.len(), 2);

        let params = RotateParams::from((-18.0, 120.0, 40.0));
        let mut expected = origin;
        expected.rotate(params.angle, params.cx, params.cy);
        assert_eq!(calls[0].target, expected);
        assert_eq!(calls[0].duration, SWING_DURATION);
        assert_eq!(calls[0].easing, Easing::Linear);
        assert_eq!(calls[1].target, origin);

        // Round trip: the leaf sits exactly where it started.
        assert_eq!(leaf.handle.transform(), origin);
    }

    #[tokio::test(start_paused = true)]
    async fn right_swing_uses_the_right_params() {
        let document = HeadlessDocument::with_elements(["#leaf1"]);
        let registry = LeafRegistry::load(&document, DATA).unwrap();
        let leaf = &registry.leaves()[0];

        swing(leaf, SwingDirection::Right).await.unwrap();

        let calls = leaf.handle.calls();
        let mut expected = Matrix::identity();
        expected.rotate(18.0, 120.0, 40.0);
        assert_eq!(calls[0].target, expected);
    }

    #[tokio::test(start_paused = true)]
    async fn a_rejected_phase_surfaces_as_an_error() {
        let mut document = HeadlessDocument::with_elements(["#leaf1"]);
        document.fail_element("#leaf1");
        let registry = LeafRegistry::load(&document, DATA).unwrap();

        let result = swing(&registry.leaves()[0], SwingDirection::Left).await;
        assert!(result.is_err());
    }
}
