use crate::config::DollyConfig;

/// Camera that dollies back and forth along the view axis by a fixed step per
/// frame. The only state that changes while the demo runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraDolly {
    offset: f32,
    delta: f32,
    near_bound: f32,
    far_bound: f32,
}

impl CameraDolly {
    pub fn new(config: &DollyConfig) -> Self {
        Self {
            offset: config.start,
            delta: config.step,
            near_bound: config.near_bound,
            far_bound: config.far_bound,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Returns the offset to draw this frame with, then steps the camera for the
    /// next one. Direction flips once the offset reaches a bound while moving
    /// towards it, so the camera overshoots by at most one step.
    pub fn advance(&mut self) -> f32 {
        let current = self.offset;
        self.offset += self.delta;

        if self.offset >= self.near_bound && self.delta > 0.0 {
            self.delta = -self.delta;
            tracing::debug!("Camera reached {:.4}, moving away", self.offset);
        }
        if self.offset <= self.far_bound && self.delta < 0.0 {
            self.delta = -self.delta;
            tracing::debug!("Camera reached {:.4}, moving closer", self.offset);
        }

        current
    }
}

impl Default for CameraDolly {
    fn default() -> Self {
        Self::new(&DollyConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f32 = 0.003125;
    const EPSILON: f32 = 1e-3;

    #[test]
    fn first_frame_uses_the_starting_offset() {
        let mut camera = CameraDolly::default();
        assert_eq!(camera.advance(), -5.0);
        assert!((camera.offset() - (-5.0 - STEP)).abs() < 1e-6);
    }

    #[test]
    fn reaches_far_bound_before_turning_back() {
        let mut camera = CameraDolly::default();
        let mut frames = 0;
        while camera.delta() < 0.0 {
            camera.advance();
            frames += 1;
            assert!(frames < 10_000, "camera never turned around");
        }

        assert!(camera.offset() <= -10.0 + EPSILON);
        assert!(camera.offset() >= -10.0 - STEP - EPSILON);
        // 5 units at 1/320 per frame.
        assert!((1590..=1610).contains(&frames), "took {frames} frames");
    }

    #[test]
    fn reaches_near_bound_before_turning_away_again() {
        let mut camera = CameraDolly::default();
        while camera.delta() < 0.0 {
            camera.advance();
        }
        while camera.delta() > 0.0 {
            camera.advance();
        }

        assert!(camera.offset() >= -5.0 - EPSILON);
        assert!(camera.offset() <= -5.0 + STEP + EPSILON);
    }

    #[test]
    fn stays_within_bounds_plus_one_step() {
        let mut camera = CameraDolly::default();
        let mut flips = 0;
        let mut previous_delta = camera.delta();

        for _ in 0..20_000 {
            let offset = camera.advance();
            assert!(offset <= -5.0 + STEP + EPSILON, "overshot near bound: {offset}");
            assert!(offset >= -10.0 - STEP - EPSILON, "overshot far bound: {offset}");
            assert!((camera.delta().abs() - STEP).abs() < 1e-9);

            if camera.delta().signum() != previous_delta.signum() {
                flips += 1;
                previous_delta = camera.delta();
            }
        }

        // Each leg takes about 1600 frames.
        assert!(flips >= 10, "only {flips} direction changes");
    }

    #[test]
    fn moving_away_past_near_bound_does_not_flip() {
        let config = DollyConfig {
            start: -4.0,
            ..DollyConfig::default()
        };
        let mut camera = CameraDolly::new(&config);

        camera.advance();
        assert!(camera.delta() < 0.0);
    }
}
