//! Systems bridging the ECS world with the background audio thread.
//!
//! Gameplay writes [`AudioCmd`] messages. Each tick:
//! - [`update_bevy_audio_cmds`] advances the command queue so writes from the
//!   previous tick become readable.
//! - [`forward_audio_cmds`] ships them over the [`AudioBridge`] channel when a
//!   bridge exists (headless runs simply let them expire).
//! - [`poll_audio_messages`] drains replies from the audio thread and
//!   [`log_audio_messages`] reports load failures.
//!
//! The device itself lives on the platform side; see
//! [`crate::resources::audio::setup_audio`].
use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::*;
use log::{debug, warn};

/// Drain pending replies from the audio thread into `Messages<AudioMessage>`.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut msgs: ResMut<Messages<AudioMessage>>) {
    msgs.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the AudioBridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Ignore send errors on shutdown
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for AudioCmd so same-frame readers can observe writes.
pub fn update_bevy_audio_cmds(mut msgs: ResMut<Messages<AudioCmd>>) {
    msgs.update();
}

pub fn log_audio_messages(mut reader: MessageReader<AudioMessage>) {
    for msg in reader.read() {
        match msg {
            AudioMessage::MusicLoadFailed { id, error } => {
                warn!("Music '{}' failed to load: {}", id, error)
            }
            AudioMessage::FxLoadFailed { id, error } => {
                warn!("Sound '{}' failed to load: {}", id, error)
            }
            other => debug!("audio: {:?}", other),
        }
    }
}

pub fn has_audio_bridge(bridge: Option<Res<AudioBridge>>) -> bool {
    bridge.is_some()
}
