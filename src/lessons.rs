/// A single teaching lesson: a canned query plus the text shown around it.
/// The catalog is fixed configuration data; lessons are never added,
/// changed, or removed at runtime.
#[derive(Debug, Clone, Copy)]
pub struct Lesson {
    pub id: u32,
    pub title: &'static str,
    pub goal: &'static str,
    pub query: &'static str,
    pub hint: &'static str,
}

/// All lessons in id order (1-10).
pub fn all() -> &'static [Lesson] {
    LESSONS
}

/// Look up one lesson. `None` for ids outside the catalog; callers report
/// an invalid selection and re-prompt.
pub fn get(id: u32) -> Option<&'static Lesson> {
    LESSONS.iter().find(|l| l.id == id)
}

const LESSONS: &[Lesson] = &[
    Lesson {
        id: 1,
        title: "Basic SELECT",
        goal: "Retrieve all items from inventory",
        query: "SELECT * FROM inventory LIMIT 5;",
        hint: "SELECT item_name, sale_price FROM inventory;",
    },
    Lesson {
        id: 2,
        title: "WHERE Clause",
        goal: "Filter items with low stock",
        query: "SELECT item_name, quantity_in_stock, reorder_level \
                FROM inventory \
                WHERE quantity_in_stock < reorder_level;",
        hint: "Find items in category 'Tools'",
    },
    Lesson {
        id: 3,
        title: "ORDER BY",
        goal: "Sort items by price",
        query: "SELECT item_name, sale_price \
                FROM inventory \
                ORDER BY sale_price DESC \
                LIMIT 5;",
        hint: "Sort by profit margin (sale_price - cost_price)",
    },
    Lesson {
        id: 4,
        title: "Aggregate Functions",
        goal: "Calculate totals and averages",
        query: "SELECT \
                    COUNT(*) AS total_items, \
                    SUM(quantity_in_stock) AS total_stock, \
                    AVG(sale_price) AS avg_price, \
                    MAX(sale_price) AS highest_price, \
                    MIN(sale_price) AS lowest_price \
                FROM inventory;",
        hint: "Calculate total inventory value (quantity * sale_price)",
    },
    Lesson {
        id: 5,
        title: "GROUP BY",
        goal: "Aggregate by category",
        query: "SELECT \
                    category, \
                    COUNT(*) AS item_count, \
                    AVG(sale_price) AS avg_price \
                FROM inventory \
                GROUP BY category \
                ORDER BY item_count DESC;",
        hint: "GROUP BY supplier to see supplier statistics",
    },
    Lesson {
        id: 6,
        title: "JOINs",
        goal: "Combine inventory and orders",
        query: "SELECT \
                    i.item_name, \
                    o.customer_name, \
                    o.quantity_ordered, \
                    o.total_price \
                FROM orders o \
                JOIN inventory i ON o.item_id = i.item_id \
                LIMIT 5;",
        hint: "Find total quantity ordered per item",
    },
    Lesson {
        id: 7,
        title: "Subqueries",
        goal: "Find items that have never been ordered",
        query: "SELECT item_name, quantity_in_stock \
                FROM inventory \
                WHERE item_id NOT IN (SELECT DISTINCT item_id FROM orders);",
        hint: "Find items with above-average price",
    },
    Lesson {
        id: 8,
        title: "CASE Statements",
        goal: "Categorize items by price range",
        query: "SELECT \
                    item_name, \
                    sale_price, \
                    CASE \
                        WHEN sale_price < 10 THEN 'Budget' \
                        WHEN sale_price < 50 THEN 'Mid-range' \
                        ELSE 'Premium' \
                    END AS price_category \
                FROM inventory \
                LIMIT 10;",
        hint: "Create stock status (Low/Medium/High)",
    },
    Lesson {
        id: 9,
        title: "Window Functions",
        goal: "Rank items by profit within each category",
        query: "SELECT \
                    item_name, \
                    category, \
                    sale_price - cost_price AS profit, \
                    RANK() OVER ( \
                        PARTITION BY category \
                        ORDER BY sale_price - cost_price DESC \
                    ) AS profit_rank \
                FROM inventory \
                ORDER BY category, profit_rank;",
        hint: "Use ROW_NUMBER() to number all items",
    },
    Lesson {
        id: 10,
        title: "CTEs (Common Table Expressions)",
        goal: "Use WITH clause for readable queries",
        query: "WITH profitable_items AS ( \
                    SELECT \
                        item_id, \
                        item_name, \
                        sale_price - cost_price AS profit \
                    FROM inventory \
                    WHERE sale_price - cost_price > 20 \
                ) \
                SELECT \
                    pi.item_name, \
                    pi.profit, \
                    COUNT(o.order_id) AS times_ordered \
                FROM profitable_items pi \
                LEFT JOIN orders o ON pi.item_id = o.item_id \
                GROUP BY pi.item_id, pi.item_name, pi.profit \
                ORDER BY pi.profit DESC;",
        hint: "Create a CTE for low stock items and join with orders",
    },
];
