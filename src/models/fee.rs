use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

pub const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Fee {
    pub id: Uuid,
    pub student_id: Uuid,
    pub month: String,
    pub year: i32,
    pub amount: i64,
    pub is_paid: bool,
    pub paid_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct FeeDetailsResponse {
    pub student: String,
    pub roll_num: i32,
    pub fees: Vec<Fee>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub student_id: Uuid,
    pub month: String,
    pub amount: i64,
}

#[derive(Debug, Deserialize)]
pub struct PayFeeRequest {
    pub student_id: Uuid,
    pub month: String,
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_distinct_months() {
        let mut months = MONTHS.to_vec();
        months.sort();
        months.dedup();
        assert_eq!(months.len(), 12);
    }
}
