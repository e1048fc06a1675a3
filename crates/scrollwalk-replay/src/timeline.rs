//! Scripted scroll/click timelines.
//!
//! A timeline is a frame count plus a list of commands pinned to frames.
//! It stands in for the page's scroll listener and click handlers.

use std::path::Path;

use scrollwalk_core::bevy::SceneCommand;
use scrollwalk_core::{MarkerId, SectionKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("failed to read timeline {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse timeline: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("event at frame {frame} is past the end of the timeline ({frames} frames)")]
    FrameOutOfRange { frame: u32, frames: u32 },
}

/// One host input, as written in timeline files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TimelineCommand {
    Scroll { progress: f32 },
    ScrollSettled,
    MarkerClick { id: MarkerId },
    SubLabelClick { id: MarkerId, section: SectionKey },
    NavClick { section: SectionKey },
    Close,
    SetViewport { width: f32, height: f32 },
    SkipIntro,
}

impl From<TimelineCommand> for SceneCommand {
    fn from(command: TimelineCommand) -> Self {
        match command {
            TimelineCommand::Scroll { progress } => Self::Scroll { progress },
            TimelineCommand::ScrollSettled => Self::ScrollSettled,
            TimelineCommand::MarkerClick { id } => Self::MarkerClick { id },
            TimelineCommand::SubLabelClick { id, section } => Self::SubLabelClick { id, section },
            TimelineCommand::NavClick { section } => Self::NavClick { section },
            TimelineCommand::Close => Self::CloseClick,
            TimelineCommand::SetViewport { width, height } => Self::SetViewport { width, height },
            TimelineCommand::SkipIntro => Self::SkipIntro,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimedCommand {
    pub frame: u32,
    #[serde(flatten)]
    pub command: TimelineCommand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    pub frames: u32,
    /// Log a frame snapshot every this many frames (0 disables).
    #[serde(default = "default_log_every")]
    pub log_every: u32,
    #[serde(default)]
    pub events: Vec<TimedCommand>,
}

fn default_log_every() -> u32 {
    30
}

impl Timeline {
    pub fn from_json(json: &str) -> Result<Self, TimelineError> {
        let mut timeline: Self = serde_json::from_str(json)?;
        timeline.validate()?;
        timeline.events.sort_by_key(|e| e.frame);
        Ok(timeline)
    }

    pub fn load(path: &Path) -> Result<Self, TimelineError> {
        let json = std::fs::read_to_string(path).map_err(|source| TimelineError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), TimelineError> {
        match self.events.iter().find(|e| e.frame >= self.frames) {
            Some(event) => Err(TimelineError::FrameOutOfRange {
                frame: event.frame,
                frames: self.frames,
            }),
            None => Ok(()),
        }
    }

    /// Commands due at `frame`, in file order.
    pub fn commands_at(&self, frame: u32) -> impl Iterator<Item = SceneCommand> + '_ {
        self.events
            .iter()
            .filter(move |e| e.frame == frame)
            .map(|e| e.command.into())
    }

    /// Built-in walk: skip the intro, scroll to the end in steps, open the
    /// "about" marker on the way and let the final scene grow.
    pub fn default_walk() -> Self {
        let mut events = vec![TimedCommand {
            frame: 0,
            command: TimelineCommand::SkipIntro,
        }];

        // 0.01 per frame up to the "about" marker
        for step in 0..=20u16 {
            events.push(TimedCommand {
                frame: 10 + u32::from(step),
                command: TimelineCommand::Scroll {
                    progress: f32::from(step) / 100.0,
                },
            });
        }
        events.extend([
            TimedCommand {
                frame: 45,
                command: TimelineCommand::MarkerClick { id: 2 },
            },
            TimedCommand {
                frame: 60,
                command: TimelineCommand::SubLabelClick {
                    id: 2,
                    section: SectionKey::About,
                },
            },
            TimedCommand {
                frame: 90,
                command: TimelineCommand::Close,
            },
        ]);
        for step in 21..=100u16 {
            events.push(TimedCommand {
                frame: 100 + u32::from(step),
                command: TimelineCommand::Scroll {
                    progress: f32::from(step) / 100.0,
                },
            });
        }

        events.sort_by_key(|e| e.frame);
        Self {
            frames: 360,
            log_every: 30,
            events,
        }
    }
}
