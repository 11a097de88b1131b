use super::*;
use crate::service::level::{
    apply_award, evaluate_message_event, evaluate_voice_tick, message_eligibility, set_level,
    voice_eligibility,
};

mod apply_award;
mod eligibility;
mod evaluate_message_event;
mod evaluate_voice_tick;
mod set_level;
