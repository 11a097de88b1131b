pub mod voice_xp;
