use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;

use crate::entities::otp::{self, Entity as Otp, OtpPurpose};
use crate::repositories::{NewOtp, OtpStore};

#[derive(Clone)]
pub struct OtpRepository {
    db: DatabaseConnection,
}

impl OtpRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OtpStore for OtpRepository {
    async fn delete_unverified(&self, email: &str, purpose: OtpPurpose) -> Result<u64, DbErr> {
        let result = Otp::delete_many()
            .filter(otp::Column::Email.eq(email))
            .filter(otp::Column::Purpose.eq(purpose))
            .filter(otp::Column::Verified.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }

    async fn insert(&self, new_otp: NewOtp) -> Result<otp::Model, DbErr> {
        otp::ActiveModel {
            id: NotSet,
            email: Set(new_otp.email),
            code: Set(new_otp.code),
            purpose: Set(new_otp.purpose),
            expires_at: Set(new_otp.expires_at),
            verified: Set(false),
            created_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
    }

    async fn latest_unverified(&self, email: &str, code: &str) -> Result<Option<otp::Model>, DbErr> {
        Otp::find()
            .filter(otp::Column::Email.eq(email))
            .filter(otp::Column::Code.eq(code))
            .filter(otp::Column::Verified.eq(false))
            .order_by_desc(otp::Column::CreatedAt)
            .order_by_desc(otp::Column::Id)
            .one(&self.db)
            .await
    }

    async fn latest_verified(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<Option<otp::Model>, DbErr> {
        Otp::find()
            .filter(otp::Column::Email.eq(email))
            .filter(otp::Column::Code.eq(code))
            .filter(otp::Column::Purpose.eq(purpose))
            .filter(otp::Column::Verified.eq(true))
            .order_by_desc(otp::Column::CreatedAt)
            .order_by_desc(otp::Column::Id)
            .one(&self.db)
            .await
    }

    async fn mark_verified(&self, id: i64) -> Result<(), DbErr> {
        Otp::update_many()
            .col_expr(otp::Column::Verified, Expr::value(true))
            .filter(otp::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), DbErr> {
        Otp::delete_by_id(id).exec(&self.db).await?;
        Ok(())
    }
}
