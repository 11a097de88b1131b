pub mod discord;
pub mod handler;
pub mod start;

#[cfg(test)]
mod test;
