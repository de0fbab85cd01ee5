//! Prompt construction for bot replies
//!
//! Every prompt is the persona preamble, the current step name, the replayed
//! conversation, and one instruction chosen by the current step.

use crate::transcript::{history, Message};
use crate::workflow::{field, FormData, WorkflowState};
use std::fmt::Write;

/// Fixed persona and tone
const PERSONA: &str = "You are a helpful and professional chatbot assistant for Galvanco, a steel and galvanization company.
Your tone should be courteous and efficient.";

/// Instruction for steps that only acknowledge and redirect
const GENERAL: &str = "The user is in a general state. Provide a helpful, generic response and guide them back to the main menu if necessary.";

/// Closing line for informational steps that have no scripted follow-up
const REDIRECT: &str =
    "Keep it brief, and let them know they can return to the main menu or finish the conversation.";

/// Build the full prompt for a reply in `state`
pub fn build_prompt(state: WorkflowState, transcript: &[Message], form: &FormData) -> String {
    let mut prompt = String::with_capacity(1024);
    prompt.push_str(PERSONA);
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "The user's current step in the conversation is: {state}.");
    let _ = writeln!(prompt, "The conversation history is:");
    let _ = writeln!(prompt, "{}", history(transcript));
    let _ = writeln!(prompt);
    prompt.push_str(&instruction(state, form));
    prompt
}

/// Step-specific instruction, interpolating the form fields the step needs
#[allow(clippy::too_many_lines)] // One arm per workflow step
pub fn instruction(state: WorkflowState, form: &FormData) -> String {
    use WorkflowState as S;

    let f = |key| form.value(key);

    match state {
        S::Welcome => {
            "Greet the user warmly and ask them to select their user type to begin.".to_string()
        }

        // New client / prospect
        S::NewClientMenu => "The user is a new client. Present the main options for new clients: Learn about products, Request a quotation, Schedule a meeting, General inquiries.".to_string(),
        S::NewClientQuotation => "The user wants a quotation. Start the process by asking for their company name.".to_string(),
        S::NewClientQuotationCompany => format!(
            "The user provided their company name: '{}'. Now ask for the contact person's name.",
            f(field::COMPANY)
        ),
        S::NewClientQuotationContact => format!(
            "The user provided the contact person: '{}'. Now ask for their email address.",
            f(field::CONTACT)
        ),
        S::NewClientQuotationEmail => format!(
            "The user provided their email: '{}'. Now ask for the required product(s).",
            f(field::EMAIL)
        ),
        S::NewClientQuotationProduct => format!(
            "The user specified the product(s): '{}'. Now ask for the required quantity.",
            f(field::PRODUCT)
        ),
        S::NewClientQuotationQuantity => format!(
            "The user provided the quantity: '{}'. Summarize all the details (Company: {}, Contact: {}, Email: {}, Product: {}, Quantity: {}) and ask for confirmation.",
            f(field::QUANTITY),
            f(field::COMPANY),
            f(field::CONTACT),
            f(field::EMAIL),
            f(field::PRODUCT),
            f(field::QUANTITY)
        ),
        S::NewClientQuotationConfirm => "Acknowledge the confirmation. Inform the user that a new lead has been created in the system and an Account Manager will be in touch shortly.".to_string(),

        // Existing client
        S::ExistingClientMenu => "The user is an existing client. Present the main options for existing clients: Track my order, Check invoice, Request technical support, Submit complaint.".to_string(),
        S::ExistingClientTrackOrder => "The user wants to track an order. Ask for their Order ID.".to_string(),
        S::ExistingClientTrackOrderId => format!(
            "The user provided Order ID '{}'. Provide a realistic, simulated real-time status update for this order. Choose one from: Design, Production, Ready, Out for Delivery, Delivered.",
            f(field::ORDER_ID)
        ),

        // Vendor / supplier
        S::VendorMenu => "The user is a vendor/supplier. Present their primary options: Register a Delivery, Book a Delivery Slot, Get Drop-off Instructions, Confirm Arrival, Confirm Unloading & Receiving.".to_string(),
        S::VendorRegisterDelivery => "The user wants to register a delivery. Start by asking for the Purchase Order (PO) number.".to_string(),
        S::VendorRegisterDeliveryPo => format!(
            "The user provided PO Number '{}'. Now, please ask for the supplier name.",
            f(field::PO_NUMBER)
        ),
        S::VendorRegisterDeliverySupplier => format!(
            "The user provided supplier name '{}'. Now, please ask for the items being delivered.",
            f(field::SUPPLIER_NAME)
        ),
        S::VendorRegisterDeliveryItems => format!(
            "The user provided the items '{}'. Now, please ask for the quantities.",
            f(field::ITEMS)
        ),
        S::VendorRegisterDeliveryQuantity => format!(
            "The user provided the quantity '{}'. Now, please ask for the vehicle type.",
            f(field::QUANTITY)
        ),
        S::VendorRegisterDeliveryVehicle => format!(
            "The user provided the vehicle type '{}'. Please summarize all the details (PO: {}, Supplier: {}, Items: {}, Quantity: {}, Vehicle: {}) and ask for final confirmation.",
            f(field::VEHICLE_TYPE),
            f(field::PO_NUMBER),
            f(field::SUPPLIER_NAME),
            f(field::ITEMS),
            f(field::QUANTITY),
            f(field::VEHICLE_TYPE)
        ),
        S::VendorRegisterDeliveryConfirm => "Acknowledge the confirmation. Inform the user that the delivery is now registered, an Advance Shipping Notice (ASN) has been created, and the delivery is planned in the system.".to_string(),

        // Internal delivery staff
        S::InternalStaffMenu => "The user is internal delivery staff. Greet them as a team member and present their options: Confirm Delivery Completed, Report Issue During Delivery, Request Support.".to_string(),
        S::InternalStaffConfirmDelivery => "The user wants to confirm a completed delivery. Please ask for the Order ID.".to_string(),
        S::InternalStaffConfirmDeliveryId => format!(
            "The user provided Order ID '{}'. Acknowledge this and confirm that the order has been marked as 'Delivered' in the ERP, a delivery ticket has been created, and Finance and Sales have been notified.",
            f(field::ORDER_ID)
        ),
        S::InternalStaffReportIssue => "The user wants to report an issue. Present the common issue types they can select from: Client Unavailable, Wrong Address, Payment Issue, Damaged Goods.".to_string(),
        S::InternalStaffReportIssueType => format!(
            "The user reported the issue: '{}'. Acknowledge this and confirm that an incident ticket has been logged and the Operations Manager, Account Manager, and Finance have been notified.",
            f(field::ISSUE_TYPE)
        ),
        S::InternalStaffRequestSupport => "The user needs support. Inform them that you can provide a location pin, relevant documents, or connect them to a live agent. Ask them what they need.".to_string(),

        // Informational steps
        S::NewClientLearn
        | S::NewClientMeeting
        | S::NewClientGeneral
        | S::ExistingClientCheckInvoice
        | S::ExistingClientTechSupport
        | S::ExistingClientComplaint
        | S::VendorBookSlot
        | S::VendorGetInstructions
        | S::VendorConfirmArrival
        | S::VendorConfirmUnloading => format!("{GENERAL} {REDIRECT}"),

        S::Feedback => "The interaction is complete. Ask the user if their request was completed successfully (Yes/No) to gather feedback.".to_string(),
        S::End => "The user has confirmed their request was successful. Thank them for using the service and close the conversation politely.".to_string(),
    }
}
