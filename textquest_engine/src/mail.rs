//! Outbound email boundary.
//!
//! The engine only builds a [`Letter`] and branches on whether [`Mailer::send`] succeeded.
//! Delivery itself lives with the transports.

use std::sync::{Mutex, PoisonError};

use log::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Extra message headers as (name, value) pairs.
    pub headers: Vec<(String, String)>,
}

pub trait Mailer: Send + Sync {
    /// Returns true if the letter was accepted for delivery.
    fn send(&self, letter: &Letter) -> bool;
}

/// Used when no mail credentials are configured. Every send fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledMailer;

impl Mailer for DisabledMailer {
    fn send(&self, letter: &Letter) -> bool {
        warn!("email disabled: not sending '{}' to {}", letter.subject, letter.to);
        false
    }
}

/// Keeps letters in memory instead of delivering them.
#[derive(Debug)]
pub struct MemoryMailer {
    accept: bool,
    sent: Mutex<Vec<Letter>>,
}

impl MemoryMailer {
    /// `accept` decides what every send reports.
    pub fn new(accept: bool) -> Self {
        Self {
            accept,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<Letter> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Mailer for MemoryMailer {
    fn send(&self, letter: &Letter) -> bool {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(letter.clone());
        self.accept
    }
}
