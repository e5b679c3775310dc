//! User-facing message texts

use indoc::indoc;

use crate::donor::{BloodGroup, DonorRecord};

pub const WELCOME: &str = indoc! {"
    👋 Welcome to the Blood Donor Bot!

    🩸 This bot helps connect blood donors with those in need.

    📋 Available Commands:

    🔍 /find - Search for blood donors by blood group
    ➕ /register - Register yourself as a blood donor
    ❓ /help - Get detailed help about using the bot

    To get started, you can:
    1. Register as a donor using /register
    2. Search for donors using /find"};

pub const HELP: &str = indoc! {"
    🩸 Blood Donor Bot Help Guide

    📋 Available Commands:

    🔍 /find
       • Search for blood donors by blood group
       • Select a blood group from the options
       • Enter location to find nearby donors
       • View contact details of available donors

    ➕ /register
       • Register yourself as a blood donor
       • Provide your blood group and contact details
       • Your information will be available to those in need

    🚫 /cancel
       • Stop a search or registration you started

    ❓ /help
       • Show this help message
       • Get detailed information about bot commands

    💡 Tips:
    • Keep your contact information up to date
    • Respond promptly to blood donation requests
    • Share this bot with others who might need it"};

pub const SELECT_GROUP_TO_FIND: &str = "🩸 Select a blood group to see available donors:";
pub const SELECT_GROUP_TO_REGISTER: &str = "🩸 Please select your blood group:";

pub const ASK_NAME: &str = "👤 Please enter your full name:";
pub const ASK_PHONE: &str = "📱 Please enter your phone number:";
pub const ASK_EMAIL: &str = "📧 Please enter your email address:";
pub const ASK_DONOR_LOCATION: &str = "📍 Please enter your location (city, state):";
pub const ASK_SEARCH_LOCATION: &str = "📍 Please enter the location where you need blood donors (city, state):";

pub const REGISTERED: &str = "✅ Thank you for registering as a blood donor! Your information has been saved.";

pub const NO_ACTIVE_FLOW: &str =
    "🤔 I'm not sure what to do with that. Use /find to search for donors or /register to become one.";

pub const STORE_FAILURE: &str =
    "⚠️ Something went wrong while reaching the donor database. Please send that again in a moment.";

pub const UNKNOWN_COMMAND: &str = "❓ I don't know that command. Use /help to see what I can do.";

pub const CANCELLED: &str = "🚫 Cancelled. Use /find or /register to start again.";
pub const NOTHING_TO_CANCEL: &str = "There is nothing to cancel right now.";

pub const DONOR_SEPARATOR: &str = "─────────────────";

/// Longest search term echoed back to the user, in characters
pub const MAX_ECHOED_LOCATION: usize = 100;

/// The search term as echoed in replies, cut to `MAX_ECHOED_LOCATION` characters
fn echoed(location: &str) -> String {
    match location.char_indices().nth(MAX_ECHOED_LOCATION) {
        Some((end, _)) => format!("{}…", &location[..end]),
        None => location.to_string(),
    }
}

/// Heading above a list of search results
pub fn results_header(group: BloodGroup, location: &str) -> String {
    format!("📋 Available blood donors for {} in {}:\n\n", group, echoed(location))
}

/// One donor's contact block
pub fn donor_block(donor: &DonorRecord) -> String {
    format!(
        "👤 Name: {}\n📱 Phone: {}\n📧 Email: {}\n📍 Location: {}\n{}\n",
        donor.name, donor.phone, donor.email, donor.location, DONOR_SEPARATOR
    )
}

pub fn no_donors_found(group: BloodGroup, location: &str) -> String {
    format!("❌ No blood donors found for {} blood group in {}.", group, echoed(location))
}
