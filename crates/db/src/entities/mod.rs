//! `SeaORM` entity definitions.

pub mod budgets;
pub mod categories;
pub mod expenses;

pub mod prelude {
    //! Entity re-exports.

    pub use super::budgets::Entity as Budgets;
    pub use super::categories::Entity as Categories;
    pub use super::expenses::Entity as Expenses;
}
