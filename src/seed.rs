use rusqlite::{params, Connection};

use crate::error::QueryError;

/// Rows inserted by one seeding pass. Zero when the tables already held
/// data; seeding never duplicates existing rows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedReport {
    pub inventory_rows: usize,
    pub order_rows: usize,
}

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS inventory (
    item_id            INTEGER PRIMARY KEY,
    item_name          TEXT NOT NULL,
    category           TEXT NOT NULL,
    supplier           TEXT,
    quantity_in_stock  INTEGER NOT NULL DEFAULT 0,
    reorder_level      INTEGER NOT NULL DEFAULT 0,
    cost_price         REAL NOT NULL,
    sale_price         REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS orders (
    order_id          INTEGER PRIMARY KEY,
    item_id           INTEGER NOT NULL,
    customer_name     TEXT NOT NULL,
    quantity_ordered  INTEGER NOT NULL,
    total_price       REAL NOT NULL,
    order_date        TEXT NOT NULL,
    FOREIGN KEY (item_id) REFERENCES inventory(item_id)
);
";

// Shaped so every lesson query has rows to show: items 5, 8, and 10 have no
// orders, a few stock levels sit below the reorder level, and sale prices
// cover all three CASE bands.
#[rustfmt::skip]
const INVENTORY: &[(i64, &str, &str, &str, i64, i64, f64, f64)] = &[
    (1,  "Claw Hammer",     "Tools",     "Acme Supply", 42,  10, 4.50,  9.99),
    (2,  "Cordless Drill",  "Tools",     "Acme Supply",  8,  12, 38.00, 79.99),
    (3,  "Screwdriver Set", "Tools",     "Acme Supply", 120, 30, 6.25,  14.99),
    (4,  "Socket Wrench",   "Tools",     "Bolt & Co",   55,  15, 9.00,  19.99),
    (5,  "Paint Roller",    "Supplies",  "Brush Bros",  14,  20, 1.80,  4.49),
    (6,  "Masking Tape",    "Supplies",  "Brush Bros",  200, 50, 0.60,  1.99),
    (7,  "Work Gloves",     "Safety",    "SafeCo",      75,  25, 2.10,  6.49),
    (8,  "Safety Goggles",  "Safety",    "SafeCo",      33,  10, 3.40,  8.99),
    (9,  "Laser Level",     "Tools",     "Bolt & Co",    6,   5, 52.00, 129.99),
    (10, "Shop Vacuum",     "Equipment", "Acme Supply",  4,   3, 88.00, 159.99),
];

#[rustfmt::skip]
const ORDERS: &[(i64, i64, &str, i64, f64, &str)] = &[
    (101, 1, "Dana Whitfield", 2,  19.98,  "2024-01-08"),
    (102, 2, "Marcus Lee",     1,  79.99,  "2024-01-12"),
    (103, 3, "Priya Nair",     3,  44.97,  "2024-02-02"),
    (104, 2, "Dana Whitfield", 1,  79.99,  "2024-02-14"),
    (105, 6, "Sam Okafor",     10, 19.90,  "2024-02-20"),
    (106, 9, "Marcus Lee",     1,  129.99, "2024-03-01"),
    (107, 4, "Priya Nair",     2,  39.98,  "2024-03-09"),
    (108, 7, "Sam Okafor",     5,  32.45,  "2024-03-15"),
];

/// Create the practice warehouse tables when absent and insert the sample
/// rows when the tables are empty.
pub fn seed(conn: &Connection) -> Result<SeedReport, QueryError> {
    conn.execute_batch(SCHEMA)?;

    let mut report = SeedReport { inventory_rows: 0, order_rows: 0 };

    if table_is_empty(conn, "inventory")? {
        let mut insert = conn.prepare(
            "INSERT INTO inventory (item_id, item_name, category, supplier, \
             quantity_in_stock, reorder_level, cost_price, sale_price) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        )?;
        for &(id, name, category, supplier, stock, reorder, cost, sale) in INVENTORY {
            report.inventory_rows +=
                insert.execute(params![id, name, category, supplier, stock, reorder, cost, sale])?;
        }
    }

    if table_is_empty(conn, "orders")? {
        let mut insert = conn.prepare(
            "INSERT INTO orders (order_id, item_id, customer_name, \
             quantity_ordered, total_price, order_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for &(id, item, customer, quantity, total, date) in ORDERS {
            report.order_rows +=
                insert.execute(params![id, item, customer, quantity, total, date])?;
        }
    }

    Ok(report)
}

fn table_is_empty(conn: &Connection, table: &str) -> Result<bool, QueryError> {
    let count: i64 =
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))?;
    Ok(count == 0)
}
