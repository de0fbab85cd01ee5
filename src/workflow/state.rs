//! Workflow steps and collected form data

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Form field names written by the free-text table and option payloads
pub mod field {
    pub const COMPANY: &str = "company";
    pub const CONTACT: &str = "contact";
    pub const EMAIL: &str = "email";
    pub const PRODUCT: &str = "product";
    pub const QUANTITY: &str = "quantity";
    pub const ORDER_ID: &str = "orderId";
    pub const PO_NUMBER: &str = "poNumber";
    pub const SUPPLIER_NAME: &str = "supplierName";
    pub const ITEMS: &str = "items";
    pub const VEHICLE_TYPE: &str = "vehicleType";
    pub const ISSUE_TYPE: &str = "issueType";
}

/// A named step in the scripted conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowState {
    #[default]
    Welcome,

    // New client / prospect
    NewClientMenu,
    NewClientLearn,
    NewClientQuotation,
    NewClientQuotationCompany,
    NewClientQuotationContact,
    NewClientQuotationEmail,
    NewClientQuotationProduct,
    NewClientQuotationQuantity,
    NewClientQuotationConfirm,
    NewClientMeeting,
    NewClientGeneral,

    // Existing client
    ExistingClientMenu,
    ExistingClientTrackOrder,
    ExistingClientTrackOrderId,
    ExistingClientCheckInvoice,
    ExistingClientTechSupport,
    ExistingClientComplaint,

    // Vendor / supplier
    VendorMenu,
    VendorRegisterDelivery,
    VendorRegisterDeliveryPo,
    VendorRegisterDeliverySupplier,
    VendorRegisterDeliveryItems,
    VendorRegisterDeliveryQuantity,
    VendorRegisterDeliveryVehicle,
    VendorRegisterDeliveryConfirm,
    VendorBookSlot,
    VendorGetInstructions,
    VendorConfirmArrival,
    VendorConfirmUnloading,

    // Internal delivery staff
    InternalStaffMenu,
    InternalStaffConfirmDelivery,
    InternalStaffConfirmDeliveryId,
    InternalStaffReportIssue,
    InternalStaffReportIssueType,
    InternalStaffRequestSupport,

    Feedback,
    End,
}

impl WorkflowState {
    /// Every state, in declaration order
    pub const ALL: [WorkflowState; 38] = [
        WorkflowState::Welcome,
        WorkflowState::NewClientMenu,
        WorkflowState::NewClientLearn,
        WorkflowState::NewClientQuotation,
        WorkflowState::NewClientQuotationCompany,
        WorkflowState::NewClientQuotationContact,
        WorkflowState::NewClientQuotationEmail,
        WorkflowState::NewClientQuotationProduct,
        WorkflowState::NewClientQuotationQuantity,
        WorkflowState::NewClientQuotationConfirm,
        WorkflowState::NewClientMeeting,
        WorkflowState::NewClientGeneral,
        WorkflowState::ExistingClientMenu,
        WorkflowState::ExistingClientTrackOrder,
        WorkflowState::ExistingClientTrackOrderId,
        WorkflowState::ExistingClientCheckInvoice,
        WorkflowState::ExistingClientTechSupport,
        WorkflowState::ExistingClientComplaint,
        WorkflowState::VendorMenu,
        WorkflowState::VendorRegisterDelivery,
        WorkflowState::VendorRegisterDeliveryPo,
        WorkflowState::VendorRegisterDeliverySupplier,
        WorkflowState::VendorRegisterDeliveryItems,
        WorkflowState::VendorRegisterDeliveryQuantity,
        WorkflowState::VendorRegisterDeliveryVehicle,
        WorkflowState::VendorRegisterDeliveryConfirm,
        WorkflowState::VendorBookSlot,
        WorkflowState::VendorGetInstructions,
        WorkflowState::VendorConfirmArrival,
        WorkflowState::VendorConfirmUnloading,
        WorkflowState::InternalStaffMenu,
        WorkflowState::InternalStaffConfirmDelivery,
        WorkflowState::InternalStaffConfirmDeliveryId,
        WorkflowState::InternalStaffReportIssue,
        WorkflowState::InternalStaffReportIssueType,
        WorkflowState::InternalStaffRequestSupport,
        WorkflowState::Feedback,
        WorkflowState::End,
    ];

    /// Wire and prompt name of the state
    pub fn name(self) -> &'static str {
        match self {
            WorkflowState::Welcome => "WELCOME",
            WorkflowState::NewClientMenu => "NEW_CLIENT_MENU",
            WorkflowState::NewClientLearn => "NEW_CLIENT_LEARN",
            WorkflowState::NewClientQuotation => "NEW_CLIENT_QUOTATION",
            WorkflowState::NewClientQuotationCompany => "NEW_CLIENT_QUOTATION_COMPANY",
            WorkflowState::NewClientQuotationContact => "NEW_CLIENT_QUOTATION_CONTACT",
            WorkflowState::NewClientQuotationEmail => "NEW_CLIENT_QUOTATION_EMAIL",
            WorkflowState::NewClientQuotationProduct => "NEW_CLIENT_QUOTATION_PRODUCT",
            WorkflowState::NewClientQuotationQuantity => "NEW_CLIENT_QUOTATION_QUANTITY",
            WorkflowState::NewClientQuotationConfirm => "NEW_CLIENT_QUOTATION_CONFIRM",
            WorkflowState::NewClientMeeting => "NEW_CLIENT_MEETING",
            WorkflowState::NewClientGeneral => "NEW_CLIENT_GENERAL",
            WorkflowState::ExistingClientMenu => "EXISTING_CLIENT_MENU",
            WorkflowState::ExistingClientTrackOrder => "EXISTING_CLIENT_TRACK_ORDER",
            WorkflowState::ExistingClientTrackOrderId => "EXISTING_CLIENT_TRACK_ORDER_ID",
            WorkflowState::ExistingClientCheckInvoice => "EXISTING_CLIENT_CHECK_INVOICE",
            WorkflowState::ExistingClientTechSupport => "EXISTING_CLIENT_TECH_SUPPORT",
            WorkflowState::ExistingClientComplaint => "EXISTING_CLIENT_COMPLAINT",
            WorkflowState::VendorMenu => "VENDOR_MENU",
            WorkflowState::VendorRegisterDelivery => "VENDOR_REGISTER_DELIVERY",
            WorkflowState::VendorRegisterDeliveryPo => "VENDOR_REGISTER_DELIVERY_PO",
            WorkflowState::VendorRegisterDeliverySupplier => "VENDOR_REGISTER_DELIVERY_SUPPLIER",
            WorkflowState::VendorRegisterDeliveryItems => "VENDOR_REGISTER_DELIVERY_ITEMS",
            WorkflowState::VendorRegisterDeliveryQuantity => "VENDOR_REGISTER_DELIVERY_QUANTITY",
            WorkflowState::VendorRegisterDeliveryVehicle => "VENDOR_REGISTER_DELIVERY_VEHICLE",
            WorkflowState::VendorRegisterDeliveryConfirm => "VENDOR_REGISTER_DELIVERY_CONFIRM",
            WorkflowState::VendorBookSlot => "VENDOR_BOOK_SLOT",
            WorkflowState::VendorGetInstructions => "VENDOR_GET_INSTRUCTIONS",
            WorkflowState::VendorConfirmArrival => "VENDOR_CONFIRM_ARRIVAL",
            WorkflowState::VendorConfirmUnloading => "VENDOR_CONFIRM_UNLOADING",
            WorkflowState::InternalStaffMenu => "INTERNAL_STAFF_MENU",
            WorkflowState::InternalStaffConfirmDelivery => "INTERNAL_STAFF_CONFIRM_DELIVERY",
            WorkflowState::InternalStaffConfirmDeliveryId => "INTERNAL_STAFF_CONFIRM_DELIVERY_ID",
            WorkflowState::InternalStaffReportIssue => "INTERNAL_STAFF_REPORT_ISSUE",
            WorkflowState::InternalStaffReportIssueType => "INTERNAL_STAFF_REPORT_ISSUE_TYPE",
            WorkflowState::InternalStaffRequestSupport => "INTERNAL_STAFF_REQUEST_SUPPORT",
            WorkflowState::Feedback => "FEEDBACK",
            WorkflowState::End => "END",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Answers collected from the user along one workflow path.
///
/// Keys are only ever added or overwritten within a session, never removed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<String, String>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Field value for prompt interpolation; a missing field renders empty
    pub fn value(&self, key: &str) -> &str {
        self.get(key).unwrap_or_default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Copy with one extra key/value
    #[must_use]
    pub fn with(&self, key: &str, value: &str) -> Self {
        let mut merged = self.clone();
        merged.insert(key, value);
        merged
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
