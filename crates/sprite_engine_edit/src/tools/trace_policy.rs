use super::{FreehandAlgorithm, Intertwine};

/// How successive samples of one gesture interact with what was drawn before.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TracePolicy {
    /// Every sample adds to the previous result.
    Accumulate,
    /// Like `Accumulate`, but the area drawn by the previous sample is
    /// restored from the source before drawing.
    AccumulateUpdateLast,
    /// The whole destination is restored before drawing each sample.
    #[default]
    Last,
    /// The destination is copied into the source after each sample.
    Overlap,
}

impl TracePolicy {
    /// Ids accepted in tool definitions. `AccumulateUpdateLast` is only
    /// reachable through [`resolve_freehand`].
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "accumulate" => Some(TracePolicy::Accumulate),
            "last" => Some(TracePolicy::Last),
            "overlap" => Some(TracePolicy::Overlap),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            TracePolicy::Accumulate => "accumulate",
            TracePolicy::AccumulateUpdateLast => "accumulate_update_last",
            TracePolicy::Last => "last",
            TracePolicy::Overlap => "overlap",
        }
    }

    pub fn is_accumulating(self) -> bool {
        matches!(self, TracePolicy::Accumulate | TracePolicy::AccumulateUpdateLast)
    }
}

/// Applies the freehand algorithm preference to a tool's configured
/// intertwiner and trace policy.
///
/// Only accumulating tools are affected; everything else is returned as is.
pub fn resolve_freehand(intertwine: Intertwine, policy: TracePolicy, algorithm: FreehandAlgorithm) -> (Intertwine, TracePolicy) {
    if !policy.is_accumulating() {
        return (intertwine, policy);
    }
    match algorithm {
        FreehandAlgorithm::Regular => (Intertwine::AsLines, TracePolicy::Accumulate),
        FreehandAlgorithm::PixelPerfect => (Intertwine::AsPixelPerfect, TracePolicy::AccumulateUpdateLast),
        FreehandAlgorithm::Dots => (Intertwine::None, TracePolicy::Accumulate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_perfect_upgrades_policy() {
        assert_eq!(
            resolve_freehand(Intertwine::AsLines, TracePolicy::Accumulate, FreehandAlgorithm::PixelPerfect),
            (Intertwine::AsPixelPerfect, TracePolicy::AccumulateUpdateLast)
        );
    }

    #[test]
    fn test_regular_and_dots() {
        assert_eq!(
            resolve_freehand(Intertwine::AsPixelPerfect, TracePolicy::AccumulateUpdateLast, FreehandAlgorithm::Regular),
            (Intertwine::AsLines, TracePolicy::Accumulate)
        );
        assert_eq!(
            resolve_freehand(Intertwine::AsLines, TracePolicy::Accumulate, FreehandAlgorithm::Dots),
            (Intertwine::None, TracePolicy::Accumulate)
        );
    }

    #[test]
    fn test_non_accumulating_tools_are_untouched() {
        for policy in [TracePolicy::Last, TracePolicy::Overlap] {
            for algorithm in [FreehandAlgorithm::Regular, FreehandAlgorithm::PixelPerfect, FreehandAlgorithm::Dots] {
                assert_eq!(resolve_freehand(Intertwine::AsRectangles, policy, algorithm), (Intertwine::AsRectangles, policy));
            }
        }
    }

    #[test]
    fn test_ids() {
        assert_eq!(TracePolicy::from_id("overlap"), Some(TracePolicy::Overlap));
        assert_eq!(TracePolicy::from_id("accumulate_update_last"), None);
        assert_eq!(TracePolicy::default().id(), "last");
    }
}
