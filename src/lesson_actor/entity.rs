//! [`ActorEntity`] implementation for [`Lesson`].
//!
//! Every capacity change happens in [`Lesson::handle_action`], inside the actor
//! task, which is what makes `Reserve` a single indivisible check-and-decrement.

use super::actions::{LessonAction, LessonActionResult};
use super::error::LessonError;
use crate::framework::ActorEntity;
use crate::model::{Lesson, LessonCreate, LessonId, LessonQuery, LessonUpdate};

fn require_text(field: &str, value: &str) -> Result<(), LessonError> {
    if value.trim().is_empty() {
        return Err(LessonError::Invalid(format!("{field} must not be empty")));
    }
    Ok(())
}

impl ActorEntity for Lesson {
    type Id = LessonId;
    type Create = LessonCreate;
    type Update = LessonUpdate;
    type Action = LessonAction;
    type ActionResult = LessonActionResult;
    type Query = LessonQuery;
    type Error = LessonError;

    fn from_create_params(id: LessonId, params: LessonCreate) -> Result<Self, LessonError> {
        require_text("subject", &params.subject)?;
        require_text("location", &params.location)?;
        Ok(Self::new(
            id,
            params.subject,
            params.location,
            params.price,
            params.space,
            params.image,
        ))
    }

    /// Overwrites every field present in the update.
    ///
    /// Numeric fields arrive already validated; `u32` keeps them non-negative.
    fn on_update(&mut self, update: LessonUpdate) -> Result<(), LessonError> {
        if let Some(subject) = update.subject {
            require_text("subject", &subject)?;
            self.subject = subject;
        }
        if let Some(location) = update.location {
            require_text("location", &location)?;
            self.location = location;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(space) = update.space {
            self.space = space;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: LessonAction) -> Result<LessonActionResult, LessonError> {
        match action {
            LessonAction::CheckSpace => Ok(LessonActionResult::Space(self.space)),
            LessonAction::Reserve(0) | LessonAction::Release(0) => {
                Err(LessonError::InvalidQuantity(0))
            }
            LessonAction::Reserve(quantity) => {
                if self.space < quantity {
                    return Err(LessonError::InsufficientSpace {
                        subject: self.subject.clone(),
                        location: self.location.clone(),
                        requested: quantity,
                        available: self.space,
                    });
                }
                self.space -= quantity;
                Ok(LessonActionResult::Reserved(self.clone()))
            }
            LessonAction::Release(quantity) => {
                self.space = self
                    .space
                    .checked_add(quantity)
                    .ok_or_else(|| LessonError::SpaceOverflow(self.id.to_string()))?;
                Ok(LessonActionResult::Released(self.space))
            }
        }
    }

    fn matches(&self, query: &LessonQuery) -> bool {
        match query {
            LessonQuery::Term(needle) => self.matches_term(needle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lesson(space: u32) -> Lesson {
        Lesson::new(LessonId::from(1), "Mathematics", "Hendon", 100, space, "math.png")
    }

    #[test]
    fn test_reserve_decrements_and_reports_price() {
        let mut l = lesson(5);
        let result = l.handle_action(LessonAction::Reserve(2)).unwrap();
        match result {
            LessonActionResult::Reserved(snapshot) => {
                assert_eq!(snapshot.space, 3);
                assert_eq!(snapshot.price, 100);
            }
            other => panic!("Expected Reserved, got {other:?}"),
        }
        assert_eq!(l.space, 3);
    }

    #[test]
    fn test_reserve_more_than_space_is_rejected_without_change() {
        let mut l = lesson(1);
        let err = l.handle_action(LessonAction::Reserve(2)).unwrap_err();
        assert_eq!(
            err,
            LessonError::InsufficientSpace {
                subject: "Mathematics".into(),
                location: "Hendon".into(),
                requested: 2,
                available: 1,
            }
        );
        assert_eq!(l.space, 1);
    }

    #[test]
    fn test_reserve_exact_space_reaches_zero() {
        let mut l = lesson(3);
        l.handle_action(LessonAction::Reserve(3)).unwrap();
        assert_eq!(l.space, 0);
        assert!(l.handle_action(LessonAction::Reserve(1)).is_err());
    }

    #[test]
    fn test_zero_quantity_is_invalid() {
        let mut l = lesson(3);
        assert_eq!(
            l.handle_action(LessonAction::Reserve(0)),
            Err(LessonError::InvalidQuantity(0))
        );
    }

    #[test]
    fn test_release_restores_space_and_guards_overflow() {
        let mut l = lesson(3);
        assert_eq!(
            l.handle_action(LessonAction::Release(2)),
            Ok(LessonActionResult::Released(5))
        );

        let mut full = lesson(u32::MAX);
        assert!(matches!(
            full.handle_action(LessonAction::Release(1)),
            Err(LessonError::SpaceOverflow(_))
        ));
        assert_eq!(full.space, u32::MAX);
    }

    #[test]
    fn test_update_rejects_blank_subject() {
        let mut l = lesson(3);
        let update = LessonUpdate {
            subject: Some("  ".into()),
            ..LessonUpdate::default()
        };
        assert!(matches!(l.on_update(update), Err(LessonError::Invalid(_))));
    }
}
