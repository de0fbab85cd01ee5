//! Pure workflow transitions
//!
//! `transition` is total over the closed state enum: an action that does not
//! apply to the current state leaves both the state and the form untouched.

use super::options::WorkflowOption;
use super::state::{field, FormData, WorkflowState};

/// A user action forwarded by the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// A button was clicked
    SelectOption(WorkflowOption),
    /// Free text was typed and submitted
    SubmitText(String),
}

/// Row of the free-text table: where submitted text goes and what follows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEntry {
    pub field: &'static str,
    pub next_state: WorkflowState,
    pub placeholder: &'static str,
}

const fn entry(
    field: &'static str,
    next_state: WorkflowState,
    placeholder: &'static str,
) -> Option<TextEntry> {
    Some(TextEntry {
        field,
        next_state,
        placeholder,
    })
}

/// Free-text table, keyed by the state the text is submitted in
pub fn text_entry(state: WorkflowState) -> Option<TextEntry> {
    use WorkflowState as S;

    match state {
        S::NewClientQuotation => entry(
            field::COMPANY,
            S::NewClientQuotationCompany,
            "Enter your company name...",
        ),
        S::NewClientQuotationCompany => entry(
            field::CONTACT,
            S::NewClientQuotationContact,
            "Enter contact person's name...",
        ),
        S::NewClientQuotationContact => {
            entry(field::EMAIL, S::NewClientQuotationEmail, "Enter your email...")
        }
        S::NewClientQuotationEmail => entry(
            field::PRODUCT,
            S::NewClientQuotationProduct,
            "Enter required product(s)...",
        ),
        S::NewClientQuotationProduct => {
            entry(field::QUANTITY, S::NewClientQuotationQuantity, "Enter quantity...")
        }
        S::ExistingClientTrackOrder => entry(
            field::ORDER_ID,
            S::ExistingClientTrackOrderId,
            "Enter your Order ID...",
        ),
        S::InternalStaffConfirmDelivery => entry(
            field::ORDER_ID,
            S::InternalStaffConfirmDeliveryId,
            "Enter the Order ID...",
        ),
        S::VendorRegisterDelivery => entry(
            field::PO_NUMBER,
            S::VendorRegisterDeliveryPo,
            "Enter the PO Number...",
        ),
        S::VendorRegisterDeliveryPo => entry(
            field::SUPPLIER_NAME,
            S::VendorRegisterDeliverySupplier,
            "Enter the supplier name...",
        ),
        S::VendorRegisterDeliverySupplier => {
            entry(field::ITEMS, S::VendorRegisterDeliveryItems, "Enter the items...")
        }
        S::VendorRegisterDeliveryItems => entry(
            field::QUANTITY,
            S::VendorRegisterDeliveryQuantity,
            "Enter the quantity...",
        ),
        S::VendorRegisterDeliveryQuantity => entry(
            field::VEHICLE_TYPE,
            S::VendorRegisterDeliveryVehicle,
            "Enter the vehicle type...",
        ),
        _ => None,
    }
}

/// Compute the next state and form data for an action
pub fn transition(
    state: WorkflowState,
    form: &FormData,
    action: &Action,
) -> (WorkflowState, FormData) {
    match action {
        Action::SelectOption(option) => {
            let form = match option.payload {
                Some((key, value)) => form.with(key, value),
                None => form.clone(),
            };
            (option.next_state, form)
        }
        Action::SubmitText(text) => match text_entry(state) {
            Some(entry) => (entry.next_state, form.with(entry.field, text)),
            None => (state, form.clone()),
        },
    }
}
