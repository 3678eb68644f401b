use tracing::{instrument, warn};

use crate::auth::dto::Credentials;
use crate::errors::AppError;
use crate::users::{User, UserModel};

fn data_mismatch() -> AppError {
    AppError::unauthorized(
        "Authentication data does not match",
        "Check if the data sent is correct",
    )
}

/// Resolves the user owning `email` and checks `password` against the stored
/// hash. An unknown email and a wrong password produce the same
/// `UnauthorizedError`; any other failure is passed through.
#[instrument(skip(users, password))]
pub async fn get_authenticated_user(
    users: &UserModel,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    let user = match users.find_one_by_email(email).await {
        Ok(user) => user,
        Err(AppError::NotFound { .. }) => {
            users.password().compare_dummy(password);
            warn!("authentication failed: unknown email");
            return Err(data_mismatch());
        }
        Err(e) => return Err(e),
    };

    if !users.password().compare(password, &user.password_hash)? {
        warn!(user_id = %user.id, "authentication failed: wrong password");
        return Err(data_mismatch());
    }

    Ok(user)
}

pub async fn authenticate(users: &UserModel, credentials: Credentials) -> Result<User, AppError> {
    get_authenticated_user(users, &credentials.email, &credentials.password).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::users::services::tests::{input, model};

    #[tokio::test]
    async fn valid_credentials_return_user() {
        let users = model();
        let created = users
            .create(input("login", "login@example.com", "123456"))
            .await
            .unwrap();
        let user = get_authenticated_user(&users, "login@example.com", "123456")
            .await
            .unwrap();
        assert_eq!(user.id, created.id);
    }

    #[tokio::test]
    async fn email_lookup_ignores_case() {
        let users = model();
        users.create(input("cased", "Cased@Example.com", "123456")).await.unwrap();
        let creds = Credentials {
            email: "cased@example.com".into(),
            password: "123456".into(),
        };
        assert!(authenticate(&users, creds).await.is_ok());
    }

    #[tokio::test]
    async fn unknown_email_and_wrong_password_look_the_same() {
        let users = model();
        users.create(input("who", "who@example.com", "123456")).await.unwrap();

        let unknown = get_authenticated_user(&users, "nobody@example.com", "123456")
            .await
            .unwrap_err()
            .to_body();
        let wrong = get_authenticated_user(&users, "who@example.com", "654321")
            .await
            .unwrap_err()
            .to_body();

        assert_eq!(unknown.name, "UnauthorizedError");
        assert_eq!(unknown.status_code, 401);
        assert_eq!(unknown.message, "Authentication data does not match");
        assert_eq!(unknown.action, "Check if the data sent is correct");
        assert_eq!(
            serde_json::to_value(&unknown).unwrap(),
            serde_json::to_value(&wrong).unwrap()
        );
    }
}
