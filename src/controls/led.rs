// src/controls/led.rs

use serde::{Deserialize, Serialize};

/// One of the discrete LED settings, each carried by its own ioctl.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedChannel {
    Brightness,
    DeepStandby,
    BlinkingTime,
}

impl LedChannel {
    /// Maps the numeric option tag used by callers. Unknown tags map to `None`.
    pub fn from_tag(tag: i32) -> Option<Self> {
        match tag {
            0 => Some(LedChannel::Brightness),
            1 => Some(LedChannel::DeepStandby),
            2 => Some(LedChannel::BlinkingTime),
            _ => None,
        }
    }

    pub fn tag(&self) -> i32 {
        match self {
            LedChannel::Brightness => 0,
            LedChannel::DeepStandby => 1,
            LedChannel::BlinkingTime => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_and_unknown_is_none() {
        for ch in [
            LedChannel::Brightness,
            LedChannel::DeepStandby,
            LedChannel::BlinkingTime,
        ] {
            assert_eq!(LedChannel::from_tag(ch.tag()), Some(ch));
        }
        assert_eq!(LedChannel::from_tag(3), None);
        assert_eq!(LedChannel::from_tag(-1), None);
    }
}
