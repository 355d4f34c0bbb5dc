//! Social Network Repository Implementation
//!
//! Reference list in `social_networks`, user links in `user_social_networks`.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};

use crate::domain::{NewSocialNetworkLink, SocialNetwork, SocialNetworkLink, SocialNetworkRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct SocialNetworkRow {
    id: i64,
    title: String,
}

#[derive(Debug, sqlx::FromRow)]
struct SocialNetworkLinkRow {
    social_network_id: i64,
    title: String,
    link: String,
}

/// Replace every link of a user on an open connection.
pub(crate) async fn replace_links(
    conn: &mut PgConnection,
    user_id: i64,
    links: &[NewSocialNetworkLink],
) -> Result<(), AppError> {
    sqlx::query("DELETE FROM user_social_networks WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut *conn)
        .await?;

    // A repeated network keeps the last submitted link.
    for link in links {
        sqlx::query(
            r#"
            INSERT INTO user_social_networks (user_id, social_network_id, link)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, social_network_id) DO UPDATE SET link = EXCLUDED.link
            "#,
        )
        .bind(user_id)
        .bind(link.social_network_id)
        .bind(&link.link)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

/// PostgreSQL social network repository implementation.
#[derive(Clone)]
pub struct PgSocialNetworkRepository {
    pool: PgPool,
}

impl PgSocialNetworkRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SocialNetworkRepository for PgSocialNetworkRepository {
    async fn find_all(&self) -> Result<Vec<SocialNetwork>, AppError> {
        let rows = sqlx::query_as::<_, SocialNetworkRow>(
            "SELECT id, title FROM social_networks ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SocialNetwork {
                id: r.id,
                title: r.title,
            })
            .collect())
    }

    async fn find_by_user_id(&self, user_id: i64) -> Result<Vec<SocialNetworkLink>, AppError> {
        let rows = sqlx::query_as::<_, SocialNetworkLinkRow>(
            r#"
            SELECT l.social_network_id, n.title, l.link
            FROM user_social_networks l
            INNER JOIN social_networks n ON n.id = l.social_network_id
            WHERE l.user_id = $1
            ORDER BY n.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| SocialNetworkLink {
                social_network_id: r.social_network_id,
                title: r.title,
                link: r.link,
            })
            .collect())
    }
}
