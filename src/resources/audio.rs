//! ECS resources that bridge the main thread with a background audio thread.
//!
//! The library never touches an audio device. Use [`setup_audio`] once during
//! initialization with the thread body the platform provides; it inserts the
//! [`AudioBridge`] so [`forward_audio_cmds`] starts shipping commands. Call
//! [`shutdown_audio`] during teardown to stop the thread.
//!
//! [`forward_audio_cmds`]: crate::systems::audio::forward_audio_cmds

use crate::events::audio::{AudioCmd, AudioMessage};
use bevy_ecs::prelude::*;
use crossbeam_channel::{Receiver, Sender, unbounded};

/// Shared bridge between the ECS world and the audio thread.
#[derive(Resource)]
pub struct AudioBridge {
    /// Sender for [`AudioCmd`] messages (ECS -> audio thread).
    pub tx_cmd: Sender<AudioCmd>,
    /// Receiver for [`AudioMessage`] messages (audio thread -> ECS).
    pub rx_msg: Receiver<AudioMessage>,
    /// Join handle for the background audio thread.
    pub handle: std::thread::JoinHandle<()>,
}

/// Spawn `thread_body` on its own thread and register the bridge.
pub fn setup_audio<F>(world: &mut World, thread_body: F)
where
    F: FnOnce(Receiver<AudioCmd>, Sender<AudioMessage>) + Send + 'static,
{
    let (tx_cmd, rx_cmd) = unbounded::<AudioCmd>();
    let (tx_msg, rx_msg) = unbounded::<AudioMessage>();

    let handle = std::thread::spawn(move || thread_body(rx_cmd, tx_msg));

    world.insert_resource(AudioBridge {
        tx_cmd,
        rx_msg,
        handle,
    });
    world.init_resource::<Messages<AudioMessage>>();
    world.init_resource::<Messages<AudioCmd>>();
}

/// Gracefully request shutdown of the audio thread and join it.
///
/// Commands still queued in the world are flushed first.
pub fn shutdown_audio(world: &mut World) {
    if let Some(bridge) = world.remove_resource::<AudioBridge>() {
        if let Some(mut msgs) = world.get_resource_mut::<Messages<AudioCmd>>() {
            for cmd in msgs.drain() {
                let _ = bridge.tx_cmd.send(cmd);
            }
        }
        let _ = bridge.tx_cmd.send(AudioCmd::Shutdown);
        let _ = bridge.handle.join();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_flushes_and_joins() {
        let (tx_seen, rx_seen) = unbounded::<AudioCmd>();
        let mut world = World::new();
        setup_audio(&mut world, move |rx, _tx| {
            for cmd in rx.iter() {
                let stop = matches!(cmd, AudioCmd::Shutdown);
                let _ = tx_seen.send(cmd);
                if stop {
                    break;
                }
            }
        });
        world
            .resource_mut::<Messages<AudioCmd>>()
            .write(AudioCmd::PlayFx { id: "gold_2".into() });
        shutdown_audio(&mut world);

        let seen: Vec<AudioCmd> = rx_seen.try_iter().collect();
        assert!(matches!(&seen[0], AudioCmd::PlayFx { id } if id == "gold_2"));
        assert!(matches!(seen[1], AudioCmd::Shutdown));
        assert!(!world.contains_resource::<AudioBridge>());
    }
}
