use super::discord::*;
use test_utils::serenity::{create_test_member, create_test_role};
