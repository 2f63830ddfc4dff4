mod bracket_table;
mod financial_year;
mod tax_bracket;

pub use bracket_table::{BracketTable, BracketTableError};
pub use financial_year::{FinancialYear, FinancialYearError};
pub use tax_bracket::TaxBracket;
