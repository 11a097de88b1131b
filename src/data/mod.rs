pub mod cooldown;
pub mod document;
pub mod guild_map;
pub mod store;
pub mod voice;
pub mod writer;

#[cfg(test)]
mod test;
