//! Structural checks for SAME headers of the form
//! `ZCZC-ORG-EEE-PSSCCC+TTTT-JJJHHMM-LLLLLLLL-`.
//!
//! Only the layout is checked. Originator and event codes are not looked up
//! in any table, so test headers with made-up codes still encode.

use thiserror::Error;

const PREAMBLE: &str = "ZCZC-";
const MAX_LOCATIONS: usize = 31;
const MAX_CALLSIGN_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("header must be printable ASCII without spaces")]
    NotAscii,
    #[error("header must start with \"ZCZC-\"")]
    MissingPreamble,
    #[error("header must end with '-'")]
    MissingTerminator,
    #[error("originator code \"{0}\" must be three letters or digits")]
    Originator(String),
    #[error("event code \"{0}\" must be three letters or digits")]
    Event(String),
    #[error("header has no location codes")]
    NoLocations,
    #[error("header has {0} location codes, at most 31 are allowed")]
    TooManyLocations(usize),
    #[error("location code \"{0}\" must be six digits")]
    Location(String),
    #[error("header has no '+' before the purge time")]
    MissingPurge,
    #[error("purge time \"{0}\" must be four digits")]
    Purge(String),
    #[error("issue time \"{0}\" must be up to seven digits")]
    IssueTime(String),
    #[error("callsign \"{0}\" must be one to eight characters without '-'")]
    Callsign(String),
}

/// A header that passed [`SameHeader::parse`]. Borrows from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SameHeader<'a> {
    raw: &'a str,
    originator: &'a str,
    event: &'a str,
    locations: &'a str,
    purge: &'a str,
    issued: &'a str,
    callsign: &'a str,
}

impl<'a> SameHeader<'a> {
    pub fn parse(raw: &'a str) -> Result<Self, HeaderError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(HeaderError::NotAscii);
        }
        let body = raw
            .strip_prefix(PREAMBLE)
            .ok_or(HeaderError::MissingPreamble)?;
        let body = body
            .strip_suffix('-')
            .ok_or(HeaderError::MissingTerminator)?;
        let (head, tail) = body.split_once('+').ok_or(HeaderError::MissingPurge)?;

        let mut fields = head.splitn(3, '-');
        let originator = fields.next().unwrap_or_default();
        if !is_code(originator) {
            return Err(HeaderError::Originator(originator.to_owned()));
        }
        let event = fields.next().unwrap_or_default();
        if !is_code(event) {
            return Err(HeaderError::Event(event.to_owned()));
        }
        let locations = fields.next().ok_or(HeaderError::NoLocations)?;
        check_locations(locations)?;

        let mut fields = tail.splitn(3, '-');
        let purge = fields.next().unwrap_or_default();
        if purge.len() != 4 || !is_digits(purge) {
            return Err(HeaderError::Purge(purge.to_owned()));
        }
        let issued = fields.next().unwrap_or_default();
        if issued.is_empty() || issued.len() > 7 || !is_digits(issued) {
            return Err(HeaderError::IssueTime(issued.to_owned()));
        }
        let callsign = fields.next().unwrap_or_default();
        if callsign.is_empty() || callsign.len() > MAX_CALLSIGN_LEN || callsign.contains('-') {
            return Err(HeaderError::Callsign(callsign.to_owned()));
        }

        Ok(Self {
            raw,
            originator,
            event,
            locations,
            purge,
            issued,
            callsign,
        })
    }

    pub fn as_str(&self) -> &'a str {
        self.raw
    }

    /// Originator code, e.g. `WXR` or `CIV`.
    pub fn originator(&self) -> &'a str {
        self.originator
    }

    /// Event code, e.g. `RWT` or `TOR`.
    pub fn event(&self) -> &'a str {
        self.event
    }

    /// Location codes (`PSSCCC`) in transmission order.
    pub fn locations(&self) -> impl Iterator<Item = &'a str> {
        self.locations.split('-')
    }

    /// Purge time as `HHMM`.
    pub fn purge(&self) -> &'a str {
        self.purge
    }

    /// Issue time as `JJJHHMM`.
    pub fn issued(&self) -> &'a str {
        self.issued
    }

    pub fn callsign(&self) -> &'a str {
        self.callsign
    }
}

fn check_locations(locations: &str) -> Result<(), HeaderError> {
    if locations.is_empty() {
        return Err(HeaderError::NoLocations);
    }
    let mut count = 0;
    for code in locations.split('-') {
        if code.len() != 6 || !is_digits(code) {
            return Err(HeaderError::Location(code.to_owned()));
        }
        count += 1;
    }
    if count > MAX_LOCATIONS {
        return Err(HeaderError::TooManyLocations(count));
    }
    Ok(())
}

fn is_code(s: &str) -> bool {
    s.len() == 3 && s.bytes().all(|b| b.is_ascii_alphanumeric())
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}
