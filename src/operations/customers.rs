use super::CrmOperations;
use crate::core::error::{CrmError, EntityError, Result, ValidationError};
use crate::core::validation::{MAX_CUSTOMER_NAME_LEN, validate_email, validate_length, validate_phone};
use crate::core::{BulkOutcome, Outcome, parse_id};
use crate::entities::{Customer, Order};

const PHONE_HINT: &str = "Invalid phone format. Use +1234567890 or 123-456-7890";

/// Request to create one customer
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl NewCustomer {
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: Option<&str>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.map(str::to_string),
        }
    }
}

impl CrmOperations {
    /// Validate and persist one customer.
    ///
    /// Checks run in order: email syntax, email uniqueness, phone format,
    /// name length.
    pub async fn create_customer(&self, input: NewCustomer) -> Outcome<Customer> {
        match self.insert_customer(input).await {
            Ok(customer) => {
                tracing::info!(customer_id = %customer.id, email = %customer.email, "customer created");
                Outcome::ok(customer, "Customer created successfully")
            }
            Err(e) => {
                tracing::debug!(error = %e, code = e.error_code(), "customer rejected");
                Outcome::fail(create_failure_message(&e))
            }
        }
    }

    /// Create each entry independently; failures are reported per row.
    ///
    /// Rows are numbered from 1. Earlier rows are persisted before later rows
    /// are checked, so a repeated email within one batch fails the repeat.
    pub async fn bulk_create_customers(&self, inputs: Vec<NewCustomer>) -> BulkOutcome<Customer> {
        let mut outcome = BulkOutcome::new();

        for (idx, input) in inputs.into_iter().enumerate() {
            let row = idx + 1;
            let email = input.email.clone();

            match self.insert_customer(input).await {
                Ok(customer) => outcome.created.push(customer),
                Err(e) => outcome.errors.push(bulk_row_message(row, &email, &e)),
            }
        }

        tracing::info!(
            created = outcome.created.len(),
            rejected = outcome.errors.len(),
            "bulk customer import finished"
        );
        outcome
    }

    async fn insert_customer(&self, input: NewCustomer) -> Result<Customer> {
        validate_email(&input.email)?;

        if self
            .store
            .find_customer_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(EntityError::Conflict {
                entity_type: "Customer".to_string(),
                field: "email".to_string(),
                value: input.email,
            }
            .into());
        }

        if !validate_phone(input.phone.as_deref()) {
            return Err(ValidationError::InvalidPhone {
                phone: input.phone.unwrap_or_default(),
            }
            .into());
        }

        validate_length("name", &input.name, MAX_CUSTOMER_NAME_LEN)?;

        let customer = Customer::new(input.name, input.email, input.phone);
        Ok(self.store.create_customer(customer).await?)
    }

    /// Point lookup; unknown or malformed ids resolve to `None`
    pub async fn customer(&self, id: &str) -> Result<Option<Customer>> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        Ok(self.store.get_customer(&id).await?)
    }

    pub async fn all_customers(&self) -> Result<Vec<Customer>> {
        Ok(self.store.list_customers().await?)
    }

    pub async fn orders_of(&self, customer: &Customer) -> Result<Vec<Order>> {
        Ok(self.store.list_orders_for_customer(&customer.id).await?)
    }
}

fn create_failure_message(err: &CrmError) -> String {
    match err {
        CrmError::Validation(ValidationError::InvalidPhone { .. }) => PHONE_HINT.to_string(),
        CrmError::Validation(e) => format!("Validation error: {}", e),
        CrmError::Entity(EntityError::Conflict { .. }) => "Email already exists".to_string(),
        other => format!("Error: {}", other),
    }
}

fn bulk_row_message(row: usize, email: &str, err: &CrmError) -> String {
    match err {
        CrmError::Validation(ValidationError::InvalidPhone { .. }) => {
            format!("Row {}: Invalid phone format for {}", row, email)
        }
        CrmError::Validation(e) => format!("Row {}: Validation error - {}", row, e),
        CrmError::Entity(EntityError::Conflict { .. }) => {
            format!("Row {}: Email {} already exists", row, email)
        }
        other => format!("Row {}: Error - {}", row, other),
    }
}
