//! The Little Lemon seed fixture
//!
//! Fixed sample rows, inserted verbatim on every run. Downstream exercises
//! query these exact values, so the literals must not be edited.

use anyhow::{Context, Result};
use sqlx::{MySql, Transaction};
use tracing::info;

pub const INSERT_MENU_ITEMS: &str = "INSERT INTO MenuItems (ItemID, Name, Type, Price) VALUES (1, 'Olives', 'Starters', 5.00), (2, 'Flatbread', 'Starters', 5.50), (3, 'Minestrone', 'Starters', 8.00), (4, 'Tomato Bread', 'Starters', 8.50), (5, 'Falafel', 'Starters', 7.50), (6, 'Hummus', 'Starters', 5.00), (7, 'Greek Salad', 'Mains', 15.00), (8, 'Bean Stew', 'Mains', 12.50), (9, 'Pizza', 'Mains', 15.00), (10, 'Greek Burger', 'Mains', 18.00), (11, 'Kabasa', 'Mains', 17.00), (12, 'Shwarma', 'Mains', 11.50), (13, 'Ice Cream', 'Desserts', 6.00), (14, 'Cheesecake', 'Desserts', 7.00);";

pub const INSERT_MENUS: &str = "INSERT INTO Menus (MenuID, ItemID, Cuisine) VALUES (1, 1, 'Greek'), (1, 7, 'Greek'), (1, 10, 'Greek'), (1, 13, 'Greek'), (2, 3, 'Italian'), (2, 9, 'Italian'), (2, 14, 'Italian'), (2, 4, 'Italian'), (3, 5, 'Turkish'), (3, 11, 'Turkish'), (3, 12, 'Turkish'), (3, 6, 'Turkish');";

pub const INSERT_EMPLOYEES: &str = "INSERT INTO Employees (EmployeeID, Name, Role, Address, Contact_Number, Email, Annual_Salary) VALUES (1, 'Mario Gollini', 'Manager', '724, Parsley Lane, Old Town, Chicago, IL', '351258074', 'Mario.g@littlelemon.com', '70000'), (2, 'Adrian Gollini', 'Assistant Manager', '334, Dill Square, Lincoln Park, Chicago, IL', '351474048', 'Adrian.g@littlelemon.com', '65000'), (3, 'Giorgos Dioudis', 'Head Chef', '879, Sage Street, West Loop, Chicago, IL', '351970582', 'Giorgos.d@littlelemon.com', '50000'), (4, 'Vanessa Tortellini', 'Chef', '345, Rosemary Lane, downtown, Chicago, IL', '351963569', 'Vanessa.t@littlelemon.com', '40000'), (5, 'Diana Pifferi', 'Chef', '156, Thyme Square, downtown, Chicago, IL', '351944802', 'Diana.p@littlelemon.com', '35000'), (6, 'Joanna Cortes', 'Head Waiter', '975, Sage Street, West Loop, Chicago, IL', '351970582', 'Joanna.c@littlelemon.com', '30000');";

pub const INSERT_BOOKINGS: &str = "INSERT INTO Bookings (BookingID, TableNo, GuestFirstName, GuestLastName, BookingSlot, EmployeeID) VALUES (1, 12, 'Anna', 'Iversen', '19:00:00', 1), (2, 12, 'Joakim', 'Iversen', '19:00:00', 1), (3, 19, 'Vanessa', 'Torres', '15:00:00', 3), (4, 15, 'Marcos', 'Romero', '17:30:00', 4), (5, 5, 'Hiroki', 'Yamane', '18:30:00', 2), (6, 8, 'Diana', 'Pinto', '20:00:00', 5);";

pub const INSERT_ORDERS: &str = "INSERT INTO Orders (OrderID, TableNo, MenuID, BookingID, Quantity, BillAmount) VALUES (1, 12, 1, 1, 2, 86.00), (2, 19, 2, 2, 1, 37.00), (3, 15, 2, 3, 1, 37.00), (4, 5, 3, 4, 1, 40.00), (5, 8, 1, 5, 1, 43.00);";

/// (table, statement) pairs in foreign-key dependency order
pub const SEED_ORDER: [(&str, &str); 5] = [
    ("MenuItems", INSERT_MENU_ITEMS),
    ("Employees", INSERT_EMPLOYEES),
    ("Menus", INSERT_MENUS),
    ("Bookings", INSERT_BOOKINGS),
    ("Orders", INSERT_ORDERS),
];

/// Expected row count per table after a successful run
pub const EXPECTED_ROW_COUNTS: [(&str, i64); 5] = [
    ("MenuItems", 14),
    ("Menus", 12),
    ("Employees", 6),
    ("Bookings", 6),
    ("Orders", 5),
];

/// Insert the fixture rows on the given transaction, in dependency order.
///
/// The caller owns commit/rollback; a failure here leaves the transaction
/// poised to roll back on drop.
pub async fn seed_tables(tx: &mut Transaction<'_, MySql>) -> Result<()> {
    for (name, statement) in SEED_ORDER {
        sqlx::query(statement)
            .execute(&mut **tx)
            .await
            .with_context(|| format!("Failed to seed table {}", name))?;
    }
    info!("Seed rows inserted");
    Ok(())
}
