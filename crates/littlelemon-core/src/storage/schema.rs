//! Table DDL for the Little Lemon schema
//!
//! The statements are the authoritative schema and must stay byte-for-byte
//! compatible with downstream exercises that inspect this fixture. Creation
//! order follows the foreign-key dependency DAG.

use anyhow::{Context, Result};
use sqlx::MySqlPool;
use tracing::info;

/// Menu items, no dependencies
pub const CREATE_MENU_ITEMS: &str = "
CREATE TABLE IF NOT EXISTS MenuItems (
    ItemID INT AUTO_INCREMENT PRIMARY KEY,
    Name VARCHAR(200),
    Type VARCHAR(100),
    Price DECIMAL(10, 2)
);";

/// Menus, references MenuItems
pub const CREATE_MENUS: &str = "
CREATE TABLE IF NOT EXISTS Menus (
    MenuID INT,
    ItemID INT,
    Cuisine VARCHAR(100),
    PRIMARY KEY (MenuID, ItemID),
    FOREIGN KEY (ItemID) REFERENCES MenuItems(ItemID)
);";

/// Employees, no dependencies
pub const CREATE_EMPLOYEES: &str = "
CREATE TABLE IF NOT EXISTS Employees (
    EmployeeID INT AUTO_INCREMENT PRIMARY KEY,
    Name VARCHAR(255),
    Role VARCHAR(100),
    Address VARCHAR(255),
    Contact_Number VARCHAR(20),
    Email VARCHAR(255),
    Annual_Salary VARCHAR(100)
);";

/// Bookings, references Employees
pub const CREATE_BOOKINGS: &str = "
CREATE TABLE IF NOT EXISTS Bookings (
    BookingID INT AUTO_INCREMENT PRIMARY KEY,
    TableNo INT,
    GuestFirstName VARCHAR(100) NOT NULL,
    GuestLastName VARCHAR(100) NOT NULL,
    BookingSlot TIME NOT NULL,
    EmployeeID INT,
    FOREIGN KEY (EmployeeID) REFERENCES Employees(EmployeeID)
);";

/// Orders, references Bookings and Menus
pub const CREATE_ORDERS: &str = "
CREATE TABLE IF NOT EXISTS Orders (
    OrderID INT,
    TableNo INT,
    MenuID INT,
    BookingID INT,
    Quantity INT,
    BillAmount DECIMAL(10, 2),
    PRIMARY KEY (OrderID, TableNo),
    FOREIGN KEY (BookingID) REFERENCES Bookings(BookingID),
    FOREIGN KEY (MenuID) REFERENCES Menus(MenuID)
);";

/// Table names in foreign-key dependency order (parents before children)
pub const TABLE_NAMES: [&str; 5] = ["MenuItems", "Employees", "Menus", "Bookings", "Orders"];

/// (name, DDL) pairs in creation order
pub const CREATE_ORDER: [(&str, &str); 5] = [
    ("MenuItems", CREATE_MENU_ITEMS),
    ("Employees", CREATE_EMPLOYEES),
    ("Menus", CREATE_MENUS),
    ("Bookings", CREATE_BOOKINGS),
    ("Orders", CREATE_ORDERS),
];

/// Create each of the five tables if absent, in dependency order
pub async fn create_tables(pool: &MySqlPool) -> Result<()> {
    for (name, ddl) in CREATE_ORDER {
        sqlx::query(ddl)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to create table {}", name))?;
    }
    info!("Tables created (or already present)");
    Ok(())
}

/// Check whether a table exists in the currently selected schema
pub async fn table_exists(pool: &MySqlPool, name: &str) -> Result<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM information_schema.tables \
         WHERE table_schema = DATABASE() AND table_name = ?",
    )
    .bind(name)
    .fetch_one(pool)
    .await
    .with_context(|| format!("Failed to check existence of table {}", name))?;

    Ok(count > 0)
}
