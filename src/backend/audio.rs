//! Background audio thread backed by raylib.
//!
//! [`audio_thread`] owns the audio device and every `Music`/`Sound` handle.
//! It is handed to [`setup_audio`](tilequest::resources::audio::setup_audio),
//! processes [`AudioCmd`]s and answers with [`AudioMessage`]s.
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use raylib::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use tilequest::events::audio::{AudioCmd, AudioMessage};

/// Runs until [`AudioCmd::Shutdown`] arrives or the channel closes.
///
/// Without an audio device the thread keeps draining commands so the game
/// runs silent.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_evt: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            error!("Failed to initialize audio device: {}", e);
            for cmd in rx_cmd.iter() {
                if cmd == AudioCmd::Shutdown {
                    break;
                }
            }
            return;
        }
    };
    info!("Audio thread started");

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        // 1) drain commands
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        debug!("Music '{}' loaded from {}", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_evt.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        debug!("Music '{}' playing, looped={}", id, want_loop);
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_evt.send(AudioMessage::MusicPlayStarted { id });
                    } else {
                        warn!("Music '{}' not loaded", id);
                    }
                }
                AudioCmd::StopMusic => {
                    for id in playing.drain() {
                        if let Some(music) = musics.get(&id) {
                            music.stop_stream();
                        }
                        looped.remove(&id);
                        let _ = tx_evt.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        debug!("Sound '{}' loaded from {}", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_evt.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        let _ = tx_evt.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => match sounds.get(&id) {
                    Some(sound) => sound.play(),
                    None => debug!("Sound '{}' not loaded", id),
                },
                AudioCmd::Shutdown => {
                    info!("Audio thread shutting down");
                    break 'run;
                }
            }
        }

        // 2) pump streams, restart looped tracks, report finished ones
        let mut ended: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                if music.is_stream_playing() {
                    music.update_stream();
                } else if music.get_time_played() >= music.get_time_length() - 0.01 {
                    ended.push(id.clone());
                }
            }
        }
        for id in ended {
            match musics.get(&id) {
                Some(music) if looped.contains(&id) => {
                    music.seek_stream(0.0);
                    music.play_stream();
                }
                _ => {
                    playing.remove(&id);
                    let _ = tx_evt.send(AudioMessage::MusicFinished { id });
                }
            }
        }
        std::thread::sleep(std::time::Duration::from_millis(10));
    }

    // handles drop before the device
    sounds.clear();
    musics.clear();
}
