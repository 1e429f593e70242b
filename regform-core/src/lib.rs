pub mod error;

pub mod config;

pub mod client {
    pub mod outcome;
    pub use outcome::{ResponseBody, SubmitOutcome};

    pub mod registration_client;
    pub use registration_client::{RegistrationClient, RegistrationSink};
}

pub mod controller {

    pub mod actions;
    pub use actions::Action;

    pub mod keymap;

    pub mod action_dispatcher;
    pub use action_dispatcher::ActionDispatcher;

    pub mod event_loop;
    pub use event_loop::{EventLoop, TaskResult};
}

pub mod model {
    pub mod form_record;
    pub use form_record::{Department, FieldName, FormRecord};

    pub mod validation;
    pub use validation::{ErrorMap, validate};

    pub mod constraints;
    pub use constraints::{ConstraintViolation, check_constraints};

    pub mod form_state;
    pub use form_state::{FormPhase, FormState, SubmitDecision};

    pub mod app_state;

    pub mod ui_state;
    pub use ui_state::{Notification, NotificationLevel, RedrawFlag, UIState};
}

pub mod tasks {
    pub mod submit_task;
}

pub mod view {
    pub mod theme;

    pub mod ui;

    pub mod components {
        pub mod form_view;
        pub use form_view::FormView;
        pub mod notification_overlay;
        pub use notification_overlay::NotificationOverlay;
        pub mod status_bar;
        pub use status_bar::StatusBar;
    }

    pub use components::*;
}

pub mod logging;
pub use logging::Logger;

pub use error::AppError;

pub use model::{app_state::AppState, form_state::FormState, ui_state::UIState};
