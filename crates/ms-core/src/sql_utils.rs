//! SQL identifier quoting utilities for MariaDB / MySQL
//!
//! Provides safe quoting for identifiers and qualified names so that
//! database and table names taken from configuration cannot break out of
//! the dynamic statements the applier builds.

/// Quote a SQL identifier with backticks.
///
/// Embedded backticks are escaped by doubling them, as MariaDB expects.
///
/// # Examples
/// ```
/// use ms_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("users"), "`users`");
/// assert_eq!(quote_ident("my`table"), "`my``table`");
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("`{}`", ident.replace('`', "``"))
}

/// Quote a `database.table` pair.
///
/// # Examples
/// ```
/// use ms_core::sql_utils::quote_qualified;
/// assert_eq!(quote_qualified("shop", "orders"), "`shop`.`orders`");
/// ```
pub fn quote_qualified(database: &str, table: &str) -> String {
    format!("{}.{}", quote_ident(database), quote_ident(table))
}

#[cfg(test)]
#[path = "sql_utils_test.rs"]
mod tests;
