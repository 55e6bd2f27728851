//! Email canonicalization.
//!
//! Addresses are lower-cased as a whole. A few large providers ignore parts of
//! the local part, so those parts are dropped too:
//!
//! - Gmail: dots and `+tag` are removed, `googlemail.com` becomes `gmail.com`.
//! - Outlook/Hotmail/Live and iCloud: `+tag` is removed.
//! - Yahoo: the last `-tag` is removed.

const GMAIL_DOMAINS: &[&str] = &["gmail.com", "googlemail.com"];

const OUTLOOK_DOMAINS: &[&str] = &[
    "hotmail.com",
    "hotmail.co.uk",
    "hotmail.fr",
    "hotmail.de",
    "hotmail.it",
    "hotmail.es",
    "live.com",
    "live.co.uk",
    "live.fr",
    "msn.com",
    "outlook.com",
    "outlook.fr",
    "outlook.de",
    "passport.com",
    "windowslive.com",
];

const YAHOO_DOMAINS: &[&str] = &[
    "yahoo.com",
    "yahoo.ca",
    "yahoo.co.uk",
    "yahoo.de",
    "yahoo.fr",
    "yahoo.in",
    "yahoo.it",
    "ymail.com",
    "rocketmail.com",
];

const ICLOUD_DOMAINS: &[&str] = &["icloud.com", "me.com", "mac.com"];

/// Returns the canonical form of `address`.
///
/// Input without an `@` is only lower-cased.
pub fn normalize_email(address: &str) -> String {
    let lowered = address.to_lowercase();
    let (local, domain) = match lowered.rsplit_once('@') {
        Some(parts) => parts,
        None => return lowered,
    };

    if GMAIL_DOMAINS.contains(&domain) {
        let local = before_first(local, '+').replace('.', "");
        format!("{}@gmail.com", local)
    } else if OUTLOOK_DOMAINS.contains(&domain) || ICLOUD_DOMAINS.contains(&domain) {
        format!("{}@{}", before_first(local, '+'), domain)
    } else if YAHOO_DOMAINS.contains(&domain) {
        format!("{}@{}", before_last(local, '-'), domain)
    } else {
        format!("{}@{}", local, domain)
    }
}

fn before_first(local: &str, separator: char) -> &str {
    local.split(separator).next().unwrap_or(local)
}

fn before_last(local: &str, separator: char) -> &str {
    local.rsplit_once(separator).map_or(local, |(head, _)| head)
}
