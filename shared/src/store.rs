use crate::errors::UserError;
use crate::types::User;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client as DynamoClient;
use std::collections::HashMap;
use std::future::Future;

/// DynamoDB item as returned by the SDK.
pub type Item = HashMap<String, AttributeValue>;

/// Single-item access to the user table.
pub trait UserStore: Send + Sync {
    /// Look up one user by email. Absent items are [`UserError::UserDoesNotExist`].
    fn fetch_user(&self, email: &str) -> impl Future<Output = Result<User, UserError>> + Send;

    /// Every user in the table, in the store's enumeration order.
    fn fetch_users(&self) -> impl Future<Output = Result<Vec<User>, UserError>> + Send;

    /// Unconditional upsert keyed by `user.email`.
    fn put_user(&self, user: &User) -> impl Future<Output = Result<(), UserError>> + Send;

    /// Delete by email and return the removed record.
    fn delete_user(&self, email: &str) -> impl Future<Output = Result<User, UserError>> + Send;
}

/// [`UserStore`] backed by a DynamoDB table with `email` as partition key.
#[derive(Debug, Clone)]
pub struct DynamoUserStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoUserStore {
    pub fn new(client: DynamoClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl UserStore for DynamoUserStore {
    async fn fetch_user(&self, email: &str) -> Result<User, UserError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("email", AttributeValue::S(email.to_string()))
            .send()
            .await
            .map_err(|e| UserError::GetItem(DisplayErrorContext(e).to_string()))?;

        let item = result.item().ok_or(UserError::UserDoesNotExist)?;
        user_from_item(item)
    }

    async fn fetch_users(&self) -> Result<Vec<User>, UserError> {
        let mut users = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| UserError::ScanItems(DisplayErrorContext(e).to_string()))?;

            for item in result.items() {
                users.push(user_from_item(item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::info!("Scanned {} users from {}", users.len(), self.table_name);
        Ok(users)
    }

    async fn put_user(&self, user: &User) -> Result<(), UserError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(user_to_item(user)))
            .send()
            .await
            .map_err(|e| UserError::PutItem(DisplayErrorContext(e).to_string()))?;

        tracing::info!("User stored: {}", user.email);
        Ok(())
    }

    async fn delete_user(&self, email: &str) -> Result<User, UserError> {
        let result = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("email", AttributeValue::S(email.to_string()))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| UserError::DeleteItem(DisplayErrorContext(e).to_string()))?;

        // DynamoDB reports no old attributes when nothing was deleted
        match result.attributes() {
            Some(attributes) if !attributes.is_empty() => user_from_item(attributes),
            _ => Err(UserError::UserDoesNotExist),
        }
    }
}

/// Encode a user as an item: strings as `S`, age as `N`.
pub fn user_to_item(user: &User) -> Item {
    HashMap::from([
        ("email".to_string(), AttributeValue::S(user.email.clone())),
        ("firstName".to_string(), AttributeValue::S(user.first_name.clone())),
        ("lastName".to_string(), AttributeValue::S(user.last_name.clone())),
        ("age".to_string(), AttributeValue::N(user.age.to_string())),
    ])
}

/// Decode an item into a user. `email` is required; other attributes default
/// to zero values when absent but must have the right type when present.
pub fn user_from_item(item: &Item) -> Result<User, UserError> {
    let email = match item.get("email") {
        Some(value) => string_attribute("email", value)?,
        None => return Err(UserError::UnmarshalItem("missing email attribute".to_string())),
    };

    let first_name = item
        .get("firstName")
        .map(|v| string_attribute("firstName", v))
        .transpose()?
        .unwrap_or_default();
    let last_name = item
        .get("lastName")
        .map(|v| string_attribute("lastName", v))
        .transpose()?
        .unwrap_or_default();
    let age = item
        .get("age")
        .map(|v| number_attribute("age", v))
        .transpose()?
        .unwrap_or_default();

    Ok(User {
        email,
        first_name,
        last_name,
        age,
    })
}

fn string_attribute(name: &str, value: &AttributeValue) -> Result<String, UserError> {
    value
        .as_s()
        .map(|s| s.to_string())
        .map_err(|_| UserError::UnmarshalItem(format!("{} is not a string attribute", name)))
}

fn number_attribute(name: &str, value: &AttributeValue) -> Result<i64, UserError> {
    let raw = value
        .as_n()
        .map_err(|_| UserError::UnmarshalItem(format!("{} is not a number attribute", name)))?;
    raw.parse()
        .map_err(|_| UserError::UnmarshalItem(format!("{} has non-integer value {:?}", name, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            age: 37,
        }
    }

    #[test]
    fn test_user_to_item_encodes_age_as_number() {
        let item = user_to_item(&user());

        assert_eq!(item["email"], AttributeValue::S("jane@example.com".to_string()));
        assert_eq!(item["firstName"], AttributeValue::S("Jane".to_string()));
        assert_eq!(item["lastName"], AttributeValue::S("Doe".to_string()));
        assert_eq!(item["age"], AttributeValue::N("37".to_string()));
    }

    #[test]
    fn test_user_from_item_reads_stored_item() {
        assert_eq!(user_from_item(&user_to_item(&user())).unwrap(), user());
    }

    #[test]
    fn test_user_from_item_defaults_missing_attributes() {
        let item = HashMap::from([(
            "email".to_string(),
            AttributeValue::S("jane@example.com".to_string()),
        )]);

        let decoded = user_from_item(&item).unwrap();
        assert_eq!(decoded.email, "jane@example.com");
        assert_eq!(decoded.first_name, "");
        assert_eq!(decoded.age, 0);
    }

    #[test]
    fn test_user_from_item_rejects_bad_attributes() {
        let mut missing_email = user_to_item(&user());
        missing_email.remove("email");
        assert!(matches!(
            user_from_item(&missing_email),
            Err(UserError::UnmarshalItem(_))
        ));

        let mut text_age = user_to_item(&user());
        text_age.insert("age".to_string(), AttributeValue::S("37".to_string()));
        assert!(matches!(
            user_from_item(&text_age),
            Err(UserError::UnmarshalItem(_))
        ));

        let mut fractional_age = user_to_item(&user());
        fractional_age.insert("age".to_string(), AttributeValue::N("37.5".to_string()));
        assert!(matches!(
            user_from_item(&fractional_age),
            Err(UserError::UnmarshalItem(_))
        ));
    }
}
