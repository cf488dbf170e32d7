use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumString};
use uuid::Uuid;
use validator::Validate;

fn validate_finite_price(price: f64) -> Result<(), validator::ValidationError> {
    if !price.is_finite() {
        return Err(validator::ValidationError::new("non_finite_price"));
    }
    Ok(())
}

/// Product category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCategory {
    #[default]
    Electronics,
    Clothing,
    Books,
}

/// Supplier category
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SupplierCategory {
    /// Regular supplier without a framework agreement
    #[default]
    Ordinary,
    /// Supplier bound by a negotiated agreement
    Conventioned,
}

/// Stock entity - a named location holding products
///
/// Products point at their stock; the reverse relation is resolved through
/// `ProductRepository::find_by_stock_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stock {
    pub id: Uuid,
    pub title: String,
}

/// DTO for creating a new stock
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewStock {
    #[validate(length(min = 1, max = 100))]
    pub title: String,
}

impl Stock {
    pub fn new(input: NewStock) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
        }
    }
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub title: String,
    pub price: f64,
    pub quantity: i32,
    pub category: ProductCategory,
    /// Owning stock, `None` until the product is assigned to one
    #[serde(default)]
    pub stock: Option<Stock>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(range(min = 0.0), custom(function = "validate_finite_price"))]
    pub price: f64,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[serde(default)]
    pub category: ProductCategory,
}

impl Product {
    pub fn new(input: NewProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            price: input.price,
            quantity: input.quantity,
            category: input.category,
            stock: None,
        }
    }

    /// Id of the owning stock, if any
    pub fn stock_id(&self) -> Option<Uuid> {
        self.stock.as_ref().map(|stock| stock.id)
    }
}

/// Invoice entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    /// Total amount of the invoice
    pub amount: f64,
    pub amount_discount: f64,
    pub date_creation: DateTime<Utc>,
    pub date_last_modification: DateTime<Utc>,
    /// Set once the invoice is cancelled; never reset
    #[serde(default)]
    pub archived: bool,
    pub operator_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
}

/// DTO for creating a new invoice
///
/// Invoices are issued outside this domain; the DTO only seeds repositories.
#[derive(Debug, Clone, Deserialize)]
pub struct NewInvoice {
    pub amount: f64,
    #[serde(default)]
    pub amount_discount: f64,
    pub date_creation: DateTime<Utc>,
    pub supplier_id: Option<Uuid>,
}

impl Invoice {
    pub fn new(input: NewInvoice) -> Self {
        Self {
            id: Uuid::now_v7(),
            amount: input.amount,
            amount_discount: input.amount_discount,
            date_creation: input.date_creation,
            date_last_modification: input.date_creation,
            archived: false,
            operator_id: None,
            supplier_id: input.supplier_id,
        }
    }

    /// Record the handling operator, returning the one it replaces
    pub fn assign_operator(&mut self, operator_id: Uuid) -> Option<Uuid> {
        let previous = self.operator_id.replace(operator_id);
        if previous != Some(operator_id) {
            self.date_last_modification = Utc::now();
        }
        previous
    }

    /// Mark the invoice as cancelled
    pub fn archive(&mut self) {
        self.archived = true;
        self.date_last_modification = Utc::now();
    }
}

/// Operator entity - staff member handling invoices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operator {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// Ids of the invoices assigned to this operator
    #[serde(default)]
    pub invoices: BTreeSet<Uuid>,
}

/// DTO for creating a new operator
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewOperator {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
}

impl Operator {
    pub fn new(input: NewOperator) -> Self {
        Self {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            invoices: BTreeSet::new(),
        }
    }

    /// Assign an invoice; returns `false` if it was already assigned
    pub fn assign_invoice(&mut self, invoice_id: Uuid) -> bool {
        self.invoices.insert(invoice_id)
    }

    /// Drop an invoice handed over to another operator
    pub fn unassign_invoice(&mut self, invoice_id: Uuid) -> bool {
        self.invoices.remove(&invoice_id)
    }
}

/// Supplier entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: Uuid,
    pub code: String,
    pub label: String,
    pub category: SupplierCategory,
    /// Invoices issued by this supplier
    #[serde(default)]
    pub invoices: Vec<Invoice>,
}

/// DTO for creating a new supplier
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewSupplier {
    #[validate(length(min = 1, max = 50))]
    pub code: String,
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    #[serde(default)]
    pub category: SupplierCategory,
}

impl Supplier {
    pub fn new(input: NewSupplier) -> Self {
        Self {
            id: Uuid::now_v7(),
            code: input.code,
            label: input.label,
            category: input.category,
            invoices: Vec::new(),
        }
    }
}
