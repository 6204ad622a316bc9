//! # Student Service
//!
//! Every operation on the student collection goes through [`StudentService`].
//! The service owns nothing but a handle to the store; it is cloned into each
//! axum handler via `State`.
//!
//! Reads filter on `active = true`, except the lookup behind
//! [`StudentService::full_update`], which also matches soft-deleted rows so a
//! full update can reactivate a student. Mutations run inside a transaction and
//! commit once; a transaction dropped on an error path is rolled back.

use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::entity::{ActiveModel, Column, Entity, Model};
use crate::errors::ApiError;
use crate::models::{
    BulkInsertRequest, NameEmailView, NameGradeView, Student, StudentCreate,
};
use crate::traits::MergeIntoActiveModel;

/// Mount point of the student routes, used to build `Location` headers.
pub const RESOURCE_PATH: &str = "/api/students";

const RESOURCE_NAME: &str = "Student";

/// A newly created resource together with the path it can be fetched from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Created<T> {
    pub location: String,
    pub value: T,
}

/// Path of the single-student resource for `id`.
#[must_use]
pub fn location_of(id: i32) -> String {
    format!("{RESOURCE_PATH}/{id}")
}

fn not_found(id: i32) -> ApiError {
    ApiError::not_found(RESOURCE_NAME, id)
}

async fn find_active<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>, ApiError> {
    Ok(Entity::find_by_id(id)
        .filter(Column::Active.eq(true))
        .one(conn)
        .await?)
}

#[derive(Clone, Debug)]
pub struct StudentService {
    db: DatabaseConnection,
}

impl StudentService {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[must_use]
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// All live students in insertion order.
    ///
    /// # Errors
    /// Returns `ApiError::Database` if the query fails.
    pub async fn list_active(&self) -> Result<Vec<Student>, ApiError> {
        let models = Entity::find()
            .filter(Column::Active.eq(true))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await?;
        tracing::debug!(count = models.len(), "Listed active students");
        Ok(models.into_iter().map(Student::from).collect())
    }

    /// # Errors
    /// Returns `ApiError::NotFound` if no live student has this id.
    pub async fn get_active_by_id(&self, id: i32) -> Result<Student, ApiError> {
        find_active(&self.db, id)
            .await?
            .map(Student::from)
            .ok_or_else(|| not_found(id))
    }

    /// Live students as name/email views, last name descending.
    ///
    /// # Errors
    /// Returns `ApiError::Database` if the query fails.
    pub async fn list_name_email_by_last_name_desc(&self) -> Result<Vec<NameEmailView>, ApiError> {
        let views = Entity::find()
            .select_only()
            .column(Column::FirstName)
            .column(Column::LastName)
            .column(Column::Email)
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::LastName)
            .into_model::<NameEmailView>()
            .all(&self.db)
            .await?;
        Ok(views)
    }

    /// Live students as first-name/grade views, first name descending.
    ///
    /// # Errors
    /// Returns `ApiError::Database` if the query fails.
    pub async fn list_name_grade_by_first_name_desc(
        &self,
    ) -> Result<Vec<NameGradeView>, ApiError> {
        let views = Entity::find()
            .select_only()
            .column(Column::FirstName)
            .column(Column::GradeId)
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::FirstName)
            .into_model::<NameGradeView>()
            .all(&self.db)
            .await?;
        Ok(views)
    }

    /// Overwrite first name, last name and email of a live student.
    ///
    /// # Errors
    /// Returns `ApiError::NotFound` if no live student has this id.
    pub async fn update_name_email(&self, id: i32, view: NameEmailView) -> Result<(), ApiError> {
        self.patch_active(id, view).await
    }

    /// Overwrite first name and grade of a live student.
    ///
    /// # Errors
    /// Returns `ApiError::NotFound` if no live student has this id.
    pub async fn update_name_grade(&self, id: i32, view: NameGradeView) -> Result<(), ApiError> {
        self.patch_active(id, view).await
    }

    async fn patch_active<P>(&self, id: i32, patch: P) -> Result<(), ApiError>
    where
        P: MergeIntoActiveModel<ActiveModel>,
    {
        let txn = self.db.begin().await?;
        let existing = find_active(&txn, id).await?.ok_or_else(|| not_found(id))?;
        let merged = patch.merge_into_activemodel(existing.into_active_model())?;
        merged.update(&txn).await?;
        txn.commit().await?;
        tracing::info!(student_id = id, "Student partially updated");
        Ok(())
    }

    /// Insert one student.
    ///
    /// # Errors
    /// Returns `ApiError::BadRequest` for a missing body and
    /// `ApiError::Conflict` if an explicit `studentId` is already taken.
    pub async fn create(&self, student: Option<StudentCreate>) -> Result<Created<Student>, ApiError> {
        let Some(student) = student else {
            return Err(ApiError::bad_request("Invalid student"));
        };

        let txn = self.db.begin().await?;
        let active_model: ActiveModel = student.into();
        let model = active_model.insert(&txn).await.map_err(ApiError::from_insert)?;
        txn.commit().await?;

        tracing::info!(student_id = model.student_id, "Student created");
        Ok(Created {
            location: location_of(model.student_id),
            value: Student::from(model),
        })
    }

    /// Overwrite every mutable column, `active` included.
    ///
    /// The lookup ignores the active flag, so this can reactivate a
    /// soft-deleted student.
    ///
    /// # Errors
    /// Returns `ApiError::BadRequest` if `id` and `student.student_id` differ,
    /// `ApiError::NotFound` if no row has this id.
    pub async fn full_update(&self, id: i32, student: Student) -> Result<(), ApiError> {
        if id != student.student_id {
            return Err(ApiError::bad_request("Student ID mismatch"));
        }

        let txn = self.db.begin().await?;
        let existing = Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| not_found(id))?;
        let merged = student.merge_into_activemodel(existing.into_active_model())?;
        merged.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(student_id = id, "Student updated");
        Ok(())
    }

    /// Insert a batch of students under one grade in a single transaction.
    ///
    /// # Errors
    /// Returns `ApiError::BadRequest` if the list is missing or empty. Any
    /// insert failure rolls back the whole batch.
    pub async fn bulk_insert_by_grade(
        &self,
        request: BulkInsertRequest,
    ) -> Result<Created<Vec<Student>>, ApiError> {
        let mut students = request.students.unwrap_or_default().into_iter();
        let Some(first) = students.next() else {
            return Err(ApiError::bad_request("Student list is empty"));
        };

        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(students.len() + 1);
        for student in std::iter::once(first).chain(students) {
            let mut active_model: ActiveModel = student.into();
            active_model.grade_id = ActiveValue::Set(request.grade_id);
            let model = active_model.insert(&txn).await.map_err(ApiError::from_insert)?;
            created.push(Student::from(model));
        }
        let location = location_of(created[0].student_id);
        txn.commit().await?;

        tracing::info!(
            grade_id = request.grade_id,
            count = created.len(),
            "Students inserted by grade"
        );
        Ok(Created {
            location,
            value: created,
        })
    }

    /// Mark a live student inactive. The row stays in the table.
    ///
    /// # Errors
    /// Returns `ApiError::NotFound` if no live student has this id, which makes
    /// a repeated delete a 404.
    pub async fn soft_delete(&self, id: i32) -> Result<(), ApiError> {
        let txn = self.db.begin().await?;
        let existing = find_active(&txn, id).await?.ok_or_else(|| not_found(id))?;
        let mut active_model = existing.into_active_model();
        active_model.active = ActiveValue::Set(false);
        active_model.update(&txn).await?;
        txn.commit().await?;

        tracing::info!(student_id = id, "Student deactivated");
        Ok(())
    }
}
