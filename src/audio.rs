//! Audio directives emitted by the simulation, and the music crossfade
//! scheduler.
//!
//! The core never touches an audio device.  It pushes [`AudioCmd`] values
//! into a queue the host drains each frame and forwards to whatever plays
//! sound.

use log::debug;

/// Index of a music track; wave `n` (1-based) plays `TrackId(n - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TrackId(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Select,
    Shoot,
    Hurt,
    Impact,
    Reload,
}

/// Commands sent *to* the host's audio device.
#[derive(Clone, Debug, PartialEq)]
pub enum AudioCmd {
    PlayFx(SoundEffect),
    PlayMusic { track: TrackId, looped: bool },
    StopMusic,
    VolumeMusic { vol: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FadePhase {
    Idle,
    /// Ramping down; on reaching silence the pending track (if any) starts.
    FadingOut,
    /// Ramping up to the volume ceiling.
    FadingIn,
}

/// Linear volume ramps across music changes.
///
/// Starting a track from silence fades straight in.  Requesting a track
/// while one is playing always fades the current one out first and queues
/// the request.  [`CrossfadeScheduler::silence`] fades out without queueing
/// anything.
#[derive(Clone, Debug)]
pub struct CrossfadeScheduler {
    phase: FadePhase,
    volume: f32,
    current: Option<TrackId>,
    pending: Option<TrackId>,
    fade_speed: f32,
    max_volume: f32,
}

impl CrossfadeScheduler {
    pub fn new(fade_speed: f32, max_volume: f32) -> Self {
        Self {
            phase: FadePhase::Idle,
            volume: 0.0,
            current: None,
            pending: None,
            fade_speed,
            max_volume,
        }
    }

    pub fn phase(&self) -> FadePhase {
        self.phase
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn current(&self) -> Option<TrackId> {
        self.current
    }

    pub fn pending(&self) -> Option<TrackId> {
        self.pending
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }

    /// Request `track`.  From silence it starts immediately at volume zero
    /// and fades in; otherwise the current track fades out first.
    pub fn play(&mut self, track: TrackId, out: &mut Vec<AudioCmd>) {
        if self.current.is_none() {
            self.current = Some(track);
            self.pending = None;
            self.volume = 0.0;
            self.phase = FadePhase::FadingIn;
            out.push(AudioCmd::PlayMusic { track, looped: true });
            out.push(AudioCmd::VolumeMusic { vol: 0.0 });
            debug!("music {:?} fading in", track);
        } else {
            self.pending = Some(track);
            self.phase = FadePhase::FadingOut;
            debug!("music {:?} fading out, {:?} queued", self.current, track);
        }
    }

    /// Fade the current track to zero and start nothing afterwards.
    pub fn silence(&mut self) {
        self.pending = None;
        if self.current.is_some() {
            self.phase = FadePhase::FadingOut;
            debug!("music {:?} fading to silence", self.current);
        }
    }

    /// Advance the active ramp by `dt` seconds.
    pub fn update(&mut self, dt: f32, out: &mut Vec<AudioCmd>) {
        match self.phase {
            FadePhase::Idle => {}
            FadePhase::FadingOut => {
                self.volume -= self.fade_speed * dt;
                if self.volume > 0.0 {
                    out.push(AudioCmd::VolumeMusic { vol: self.volume });
                    return;
                }

                self.volume = 0.0;
                out.push(AudioCmd::VolumeMusic { vol: 0.0 });
                out.push(AudioCmd::StopMusic);
                self.current = self.pending.take();

                match self.current {
                    Some(track) => {
                        out.push(AudioCmd::PlayMusic { track, looped: true });
                        self.phase = FadePhase::FadingIn;
                        debug!("music switched to {:?}", track);
                    }
                    None => {
                        self.phase = FadePhase::Idle;
                        debug!("music silent");
                    }
                }
            }
            FadePhase::FadingIn => {
                self.volume += self.fade_speed * dt;
                if self.volume >= self.max_volume {
                    self.volume = self.max_volume;
                    self.phase = FadePhase::Idle;
                }
                out.push(AudioCmd::VolumeMusic { vol: self.volume });
            }
        }
    }
}
