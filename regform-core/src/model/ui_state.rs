//! UI state: redraw flags and the transient notification slot

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::{Duration, Instant};

use compact_str::CompactString;

use crate::config::NotificationConfig;

/// Atomic redraw flags for lock-free UI updates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RedrawFlag {
    Form = 1,
    StatusBar = 2,
    Notification = 4,
    All = 7,
}

impl RedrawFlag {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Notification severities
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum NotificationLevel {
    Success = 1,
    Warning = 2,
    Error = 3,
}

/// Compact notification with timestamp
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: CompactString,
    pub level: NotificationLevel,
    pub timestamp: Instant,
    pub auto_dismiss: Option<Duration>,
}

impl Notification {
    pub fn is_expired(&self) -> bool {
        self.auto_dismiss
            .is_some_and(|after| self.timestamp.elapsed() > after)
    }
}

#[derive(Debug)]
pub struct UIState {
    pub redraw_flags: AtomicU32,
    pub frame_count: AtomicU64,

    /// Single visible notification; a newer one replaces it.
    pub notification: Option<Notification>,
    pub notifications_shown: u64,

    dismiss: NotificationConfig,
}

impl Default for UIState {
    fn default() -> Self {
        Self::new(NotificationConfig::default())
    }
}

impl UIState {
    pub fn new(dismiss: NotificationConfig) -> Self {
        Self {
            redraw_flags: AtomicU32::new(RedrawFlag::All.bits() as u32),
            frame_count: AtomicU64::new(0),
            notification: None,
            notifications_shown: 0,
            dismiss,
        }
    }

    // Atomic redraw operations
    #[inline]
    pub fn request_redraw(&self, flag: RedrawFlag) {
        self.redraw_flags
            .fetch_or(flag.bits() as u32, Ordering::Relaxed);
    }

    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_flags.load(Ordering::Relaxed) != 0
    }

    #[inline]
    pub fn clear_redraw(&self) {
        self.redraw_flags.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn increment_frame(&self) {
        self.frame_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn show_notification(
        &mut self,
        message: impl Into<CompactString>,
        level: NotificationLevel,
        auto_dismiss: Option<Duration>,
    ) {
        self.notification = Some(Notification {
            message: message.into(),
            level,
            timestamp: Instant::now(),
            auto_dismiss,
        });
        self.notifications_shown += 1;
        self.request_redraw(RedrawFlag::Notification);
    }

    #[inline]
    pub fn show_success(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Success, self.dismiss.success);
    }

    #[inline]
    pub fn show_warning(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Warning, self.dismiss.warning);
    }

    #[inline]
    pub fn show_error(&mut self, message: impl Into<CompactString>) {
        self.show_notification(message, NotificationLevel::Error, self.dismiss.error);
    }

    // Auto-dismiss notifications
    pub fn update_notification(&mut self) -> bool {
        if self.notification.as_ref().is_some_and(Notification::is_expired) {
            self.notification = None;
            self.request_redraw(RedrawFlag::Notification);
            return true;
        }
        false
    }

    pub fn dismiss_notification(&mut self) -> bool {
        if self.notification.take().is_some() {
            self.request_redraw(RedrawFlag::All);
            true
        } else {
            false
        }
    }
}
