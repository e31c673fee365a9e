use sea_orm::{ColumnTrait, EntityTrait, Order, QueryOrder, Select, sea_query::NullOrdering};

/// `ORDER BY <col> ASC NULLS LAST` for optional text columns such as display names.
pub trait OrderByNullsLast {
    fn order_by_asc_nulls_last<C: ColumnTrait>(self, col: C) -> Self;
}

impl<E> OrderByNullsLast for Select<E>
where
    E: EntityTrait,
{
    fn order_by_asc_nulls_last<C: ColumnTrait>(self, col: C) -> Self {
        self.order_by_with_nulls(col, Order::Asc, NullOrdering::Last)
    }
}
