pub mod audio_source;
