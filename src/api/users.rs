use crate::error::ApiError;
use crate::gateway::{ApiRequest, Gateway};
use crate::models::{Id, Page, UserPage, UserSummary};

/// Admin user management.
pub struct UsersApi<'a> {
    gateway: &'a Gateway,
}

impl<'a> UsersApi<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        UsersApi { gateway }
    }

    pub async fn list(&self) -> Result<Page<UserSummary>, ApiError> {
        let page: UserPage = self.gateway.send(&ApiRequest::get("/user")).await?.data()?;
        let (items, total) = page.into_users();
        Ok(Page { items, total })
    }

    pub async fn delete(&self, id: &Id) -> Result<(), ApiError> {
        self.gateway
            .send(&ApiRequest::delete(format!("/user/{}", id)))
            .await?
            .ensure_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::gateway;
    use mockito::Server;

    #[tokio::test]
    async fn test_list_reads_users_and_count() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/user")
            .with_status(200)
            .with_body(
                r#"{"status": "success", "data": {"users": [{"id": 1, "email": "a@b.c", "role": "admin"}], "count": 57}}"#,
            )
            .create_async()
            .await;

        let page = UsersApi::new(&gateway(&server)).list().await.unwrap();

        assert_eq!(page.total, 57);
        assert_eq!(page.items[0].role, "admin");
    }

    #[tokio::test]
    async fn test_delete_non_success_envelope() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/user/4")
            .with_status(200)
            .with_body(r#"{"status": "error", "message": "cannot delete yourself"}"#)
            .create_async()
            .await;

        let err = UsersApi::new(&gateway(&server))
            .delete(&Id::from(4))
            .await
            .unwrap_err();

        assert_eq!(err.server_message(), Some("cannot delete yourself"));
    }
}
