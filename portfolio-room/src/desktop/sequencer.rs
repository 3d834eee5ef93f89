use constants::sequencer::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceKind {
    Boot,
    Shutdown,
}

/// Fixed-duration overlay: a hold phase followed by a fade to transparent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySequence {
    kind: SequenceKind,
    elapsed: f32,
}

impl OverlaySequence {
    pub fn boot() -> Self {
        Self {
            kind: SequenceKind::Boot,
            elapsed: 0.0,
        }
    }

    pub fn shutdown() -> Self {
        Self {
            kind: SequenceKind::Shutdown,
            elapsed: 0.0,
        }
    }

    pub fn kind(&self) -> SequenceKind {
        self.kind
    }

    fn hold_duration(&self) -> f32 {
        match self.kind {
            SequenceKind::Boot => BOOT_PROGRESS_DURATION,
            SequenceKind::Shutdown => SHUTDOWN_DWELL_DURATION,
        }
    }

    fn fade_duration(&self) -> f32 {
        match self.kind {
            SequenceKind::Boot => BOOT_FADE_DURATION,
            SequenceKind::Shutdown => SHUTDOWN_FADE_DURATION,
        }
    }

    pub fn total_duration(&self) -> f32 {
        self.hold_duration() + self.fade_duration()
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.total_duration());
    }

    /// Progress bar fill in [0, 1]. Only the boot screen has one.
    pub fn progress(&self) -> Option<f32> {
        match self.kind {
            SequenceKind::Boot => Some((self.elapsed / self.hold_duration()).clamp(0.0, 1.0)),
            SequenceKind::Shutdown => None,
        }
    }

    /// Overlay opacity. Fully opaque from the first frame until the fade starts.
    pub fn alpha(&self) -> f32 {
        let fade_elapsed = self.elapsed - self.hold_duration();
        if fade_elapsed <= 0.0 {
            1.0
        } else {
            1.0 - (fade_elapsed / self.fade_duration()).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.total_duration()
    }

    pub fn label(&self) -> &'static str {
        match self.kind {
            SequenceKind::Boot => "Starting up...",
            SequenceKind::Shutdown => "Shutting down...",
        }
    }
}

/// Linear opacity ramp for the desktop UI as a whole.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
}

impl Fade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            elapsed: 0.0,
            duration: duration.max(f32::EPSILON),
        }
    }

    pub fn fade_in() -> Self {
        Self::new(0.0, 1.0, DESKTOP_FADE_DURATION)
    }

    /// Fade to transparent at the full-fade rate, starting wherever the desktop is.
    pub fn fade_out_from(opacity: f32) -> Self {
        let opacity = opacity.clamp(0.0, 1.0);
        Self::new(opacity, 0.0, DESKTOP_FADE_DURATION * opacity)
    }

    pub fn is_fading_in(&self) -> bool {
        self.to > self.from
    }

    /// Step and return the new opacity.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.value()
    }

    pub fn value(&self) -> f32 {
        let t = self.elapsed / self.duration;
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boot_fills_then_fades() {
        let mut boot = OverlaySequence::boot();
        assert_eq!(boot.progress(), Some(0.0));
        assert_eq!(boot.alpha(), 1.0);

        boot.advance(1.0);
        assert!((boot.progress().unwrap() - 0.5).abs() < 1e-5);
        assert_eq!(boot.alpha(), 1.0);

        boot.advance(1.0);
        assert_eq!(boot.progress(), Some(1.0));
        assert_eq!(boot.alpha(), 1.0);
        assert!(!boot.is_finished());

        boot.advance(0.25);
        assert!((boot.alpha() - 0.5).abs() < 1e-5);

        boot.advance(0.25);
        assert_eq!(boot.alpha(), 0.0);
        assert!(boot.is_finished());
    }

    #[test]
    fn shutdown_is_opaque_immediately_and_holds() {
        let mut shutdown = OverlaySequence::shutdown();
        assert_eq!(shutdown.alpha(), 1.0);
        assert_eq!(shutdown.progress(), None);

        shutdown.advance(1.1);
        assert_eq!(shutdown.alpha(), 1.0);

        shutdown.advance(0.1 + 0.4);
        assert!((shutdown.alpha() - 0.5).abs() < 1e-4);
        assert!(!shutdown.is_finished());

        shutdown.advance(10.0);
        assert!(shutdown.is_finished());
        assert!((shutdown.total_duration() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn desktop_reveal_ramps_over_half_a_second() {
        let mut fade = Fade::fade_in();
        assert!(fade.is_fading_in());
        assert!((fade.advance(0.25) - 0.5).abs() < 1e-5);
        assert_eq!(fade.advance(0.5), 1.0);
        assert!(fade.is_finished());

        let mut out = Fade::fade_out_from(1.0);
        assert!(!out.is_fading_in());
        assert_eq!(out.advance(1.0), 0.0);
    }

    #[test]
    fn interrupted_reveal_fades_out_without_jumping() {
        let mut reveal = Fade::fade_in();
        let opacity = reveal.advance(0.1);

        let mut out = Fade::fade_out_from(opacity);
        assert!((out.value() - opacity).abs() < 1e-6);
        assert!(out.advance(0.05) < opacity);
        assert_eq!(out.advance(1.0), 0.0);
        assert!(out.is_finished());
    }
}
