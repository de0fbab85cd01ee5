//! Static option tables
//!
//! `options_for` maps each state to the affordance the presentation layer
//! should render: a fixed set of buttons, a text box, or nothing.

use super::state::{field, WorkflowState};
use super::transition::text_entry;
use serde::Serialize;

/// A selectable action presented to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowOption {
    pub label: &'static str,
    pub next_state: WorkflowState,
    /// Key/value merged into the form data when selected
    #[serde(skip)]
    pub payload: Option<(&'static str, &'static str)>,
}

impl WorkflowOption {
    const fn to(label: &'static str, next_state: WorkflowState) -> Self {
        Self {
            label,
            next_state,
            payload: None,
        }
    }

    const fn with_payload(
        label: &'static str,
        next_state: WorkflowState,
        key: &'static str,
        value: &'static str,
    ) -> Self {
        Self {
            label,
            next_state,
            payload: Some((key, value)),
        }
    }
}

/// What the user can do in a given state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Affordance {
    Buttons { items: &'static [WorkflowOption] },
    Text { placeholder: &'static str },
    None,
}

impl Affordance {
    /// Buttons on offer; empty for text and none
    pub fn buttons(&self) -> &'static [WorkflowOption] {
        match self {
            Affordance::Buttons { items } => *items,
            Affordance::Text { .. } | Affordance::None => &[],
        }
    }

    pub fn option(&self, index: usize) -> Option<&'static WorkflowOption> {
        self.buttons().get(index)
    }

    pub fn accepts_text(&self) -> bool {
        matches!(self, Affordance::Text { .. })
    }
}

use WorkflowState as S;

const WELCOME: &[WorkflowOption] = &[
    WorkflowOption::to("New Client / Prospect", S::NewClientMenu),
    WorkflowOption::to("Existing Client", S::ExistingClientMenu),
    WorkflowOption::to("Vendor / Supplier", S::VendorMenu),
    WorkflowOption::to("Internal Delivery Staff", S::InternalStaffMenu),
];

const NEW_CLIENT_MENU: &[WorkflowOption] = &[
    WorkflowOption::to("Learn about products and services", S::NewClientLearn),
    WorkflowOption::to("Request a quotation", S::NewClientQuotation),
    WorkflowOption::to("Schedule a meeting with Sales", S::NewClientMeeting),
    WorkflowOption::to("General inquiries", S::NewClientGeneral),
];

const EXISTING_CLIENT_MENU: &[WorkflowOption] = &[
    WorkflowOption::to("Track my order or delivery", S::ExistingClientTrackOrder),
    WorkflowOption::to("Check invoice or payment status", S::ExistingClientCheckInvoice),
    WorkflowOption::to("Request technical support", S::ExistingClientTechSupport),
    WorkflowOption::to("Submit complaint or feedback", S::ExistingClientComplaint),
];

const VENDOR_MENU: &[WorkflowOption] = &[
    WorkflowOption::to("Register a Delivery", S::VendorRegisterDelivery),
    WorkflowOption::to("Book a Delivery Slot", S::VendorBookSlot),
    WorkflowOption::to("Get Drop-off Instructions", S::VendorGetInstructions),
    WorkflowOption::to("Confirm Arrival", S::VendorConfirmArrival),
    WorkflowOption::to("Confirm Unloading & Receiving", S::VendorConfirmUnloading),
];

const INTERNAL_STAFF_MENU: &[WorkflowOption] = &[
    WorkflowOption::to("Confirm Delivery Completed", S::InternalStaffConfirmDelivery),
    WorkflowOption::to("Report Issue During Delivery", S::InternalStaffReportIssue),
    WorkflowOption::to("Request Support", S::InternalStaffRequestSupport),
];

const ISSUE_TYPES: &[WorkflowOption] = &[
    WorkflowOption::with_payload(
        "Client Unavailable",
        S::InternalStaffReportIssueType,
        field::ISSUE_TYPE,
        "Client Unavailable",
    ),
    WorkflowOption::with_payload(
        "Wrong Address",
        S::InternalStaffReportIssueType,
        field::ISSUE_TYPE,
        "Wrong Address",
    ),
    WorkflowOption::with_payload(
        "Payment Issue",
        S::InternalStaffReportIssueType,
        field::ISSUE_TYPE,
        "Payment Issue",
    ),
    WorkflowOption::with_payload(
        "Damaged Goods",
        S::InternalStaffReportIssueType,
        field::ISSUE_TYPE,
        "Damaged Goods",
    ),
];

const CONFIRM_QUOTATION: &[WorkflowOption] = &[
    WorkflowOption::to("Confirm, proceed", S::NewClientQuotationConfirm),
    WorkflowOption::to("Start over", S::Welcome),
];

const CONFIRM_DELIVERY: &[WorkflowOption] = &[
    WorkflowOption::to("Confirm, proceed", S::VendorRegisterDeliveryConfirm),
    WorkflowOption::to("Start over", S::Welcome),
];

const WRAP_UP: &[WorkflowOption] = &[
    WorkflowOption::to("Back to main menu", S::Welcome),
    WorkflowOption::to("That's all, thanks", S::Feedback),
];

// "No" would escalate in a staffed deployment; both answers close the chat.
const FEEDBACK: &[WorkflowOption] = &[
    WorkflowOption::to("Yes", S::End),
    WorkflowOption::to("No", S::End),
];

/// Affordance for a state
pub fn options_for(state: WorkflowState) -> Affordance {
    if let Some(entry) = text_entry(state) {
        return Affordance::Text {
            placeholder: entry.placeholder,
        };
    }

    let items = match state {
        S::Welcome => WELCOME,
        S::NewClientMenu => NEW_CLIENT_MENU,
        S::ExistingClientMenu => EXISTING_CLIENT_MENU,
        S::VendorMenu => VENDOR_MENU,
        S::InternalStaffMenu => INTERNAL_STAFF_MENU,
        S::InternalStaffReportIssue => ISSUE_TYPES,
        S::NewClientQuotationQuantity => CONFIRM_QUOTATION,
        S::VendorRegisterDeliveryVehicle => CONFIRM_DELIVERY,
        S::NewClientQuotationConfirm
        | S::ExistingClientTrackOrderId
        | S::InternalStaffConfirmDeliveryId
        | S::InternalStaffReportIssueType
        | S::VendorRegisterDeliveryConfirm
        | S::NewClientLearn
        | S::NewClientMeeting
        | S::NewClientGeneral
        | S::ExistingClientCheckInvoice
        | S::ExistingClientTechSupport
        | S::ExistingClientComplaint
        | S::VendorBookSlot
        | S::VendorGetInstructions
        | S::VendorConfirmArrival
        | S::VendorConfirmUnloading
        | S::InternalStaffRequestSupport => WRAP_UP,
        S::Feedback => FEEDBACK,
        // END, and the free-text states answered above
        _ => return Affordance::None,
    };
    Affordance::Buttons { items }
}
