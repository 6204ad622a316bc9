use sea_orm::DbErr;

/// A patch that knows which columns of an active model it is allowed to write.
///
/// Columns the patch does not touch keep their `Unchanged` state, so the
/// resulting `UPDATE` only lists the columns the patch owns.
pub trait MergeIntoActiveModel<ActiveModelType> {
    /// # Errors
    /// Implementations may reject a patch that cannot be applied to `existing`.
    fn merge_into_activemodel(self, existing: ActiveModelType) -> Result<ActiveModelType, DbErr>;
}
