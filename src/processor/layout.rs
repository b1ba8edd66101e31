/// Bus layouts the processor accepts.
///
/// Input and output must match; only mono and stereo are supported. Hosts
/// should negotiate before the first `prepare` so the chain never sees
/// anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

impl ChannelLayout {
    /// Accept a host's proposed input/output channel counts, or refuse them.
    pub fn negotiate(inputs: usize, outputs: usize) -> Option<Self> {
        if inputs != outputs {
            return None;
        }
        Self::from_channels(outputs)
    }

    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(Self::Mono),
            2 => Some(Self::Stereo),
            _ => None,
        }
    }

    pub fn channels(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}
