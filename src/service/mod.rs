pub mod activity;
pub mod bonus;
pub mod estimate;
pub mod level;
pub mod notification;
pub mod prestige;
pub mod role_sync;

#[cfg(test)]
mod test;
