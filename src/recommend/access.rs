//! Access-method derivation: a single string describing how to reach a
//! service, chosen by fixed precedence among answer-derived conditions.

use super::{chose, AnswerSet};
use crate::catalog::Service;

pub(crate) const HOTLINE_ACCESS: &str = "Call 6213-8008 now for immediate assistance";
pub(crate) const ONLINE_ACCESS: &str = "Access online at ntuc.org.sg or via mobile app";
pub(crate) const IN_PERSON_ACCESS: &str = "Visit your nearest NTUC service centre";
pub(crate) const PHONE_ACCESS: &str = "Reach us by phone or WhatsApp on 6213-8008";
pub(crate) const DEFAULT_ACCESS: &str =
    "Multiple access options available - choose what works for you";

/// First match wins; an urgent need for a hotline-capable service trumps any
/// stated channel preference.
pub(crate) fn derive(answers: &AnswerSet, service: &Service) -> String {
    if chose(&answers.urgency, "immediate") && service.channel_includes("hotline") {
        return HOTLINE_ACCESS.to_string();
    }
    if chose(&answers.channel, "digital") && service.channel_includes_any(&["digital", "online"]) {
        return ONLINE_ACCESS.to_string();
    }
    if chose(&answers.channel, "physical") && service.channel_includes("physical") {
        return IN_PERSON_ACCESS.to_string();
    }
    if chose(&answers.channel, "phone") && service.channel_includes_any(&["hotline", "phone"]) {
        return PHONE_ACCESS.to_string();
    }
    DEFAULT_ACCESS.to_string()
}
