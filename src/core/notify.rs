//! Mutations that also broadcast a notification to the whole team.
//!
//! The record is stored first; the notification is only queued once the store
//! accepted it, so a rejected sale or booking never announces anything.

use crate::{
    errors::Result,
    models::{CarType, NewSale, NewTestDrive, NotificationKind, SaleRecord, TestDrive},
    stores::{NotificationStore, SalesStore, TestDriveStore},
};
use chrono::{DateTime, Utc};
use tracing::info;

/// Records a sale dated `now` and announces it.
pub fn record_sale<'a>(
    sales: &'a mut SalesStore,
    notifications: &mut NotificationStore,
    new: NewSale,
    seller_name: &str,
    now: DateTime<Utc>,
) -> Result<&'a SaleRecord> {
    let sale = sales.add_sale(new, now)?;

    let condition = match sale.car_type {
        CarType::New => "ny",
        CarType::Used => "begagnad",
    };
    let brand = sale
        .car_brand
        .map(|brand| format!(" ({brand})"))
        .unwrap_or_default();
    notifications.add(
        NotificationKind::Sale,
        "Ny försäljning!",
        format!("{seller_name} har sålt en {condition} bil{brand}!"),
        now,
    );

    info!(seller = %seller_name, sale = %sale.id, "Announced sale");
    Ok(sale)
}

/// Books a test drive and announces it.
pub fn book_test_drive<'a>(
    test_drives: &'a mut TestDriveStore,
    notifications: &mut NotificationStore,
    new: NewTestDrive,
    seller_name: &str,
    now: DateTime<Utc>,
) -> Result<&'a TestDrive> {
    let drive = test_drives.add_test_drive(new)?;

    let car = drive
        .car_brand
        .map_or_else(|| "begagnad bil".to_string(), |brand| brand.to_string());
    notifications.add(
        NotificationKind::TestDrive,
        "Ny provkörning bokad",
        format!(
            "{seller_name} har bokat en provkörning med {} ({car})",
            drive.customer_name
        ),
        now,
    );

    info!(seller = %seller_name, test_drive = %drive.id, "Announced test drive");
    Ok(drive)
}
