use crate::{EngineError, FieldErrors, MovementCmd, Outcome};

mod delete;
mod execute;
mod find;

/// Structural validation: everything checkable without touching storage.
///
/// Violations are collected into one field-keyed map rather than reported
/// one at a time. `movement_date` needs no check here: a `NaiveDate` cannot
/// hold an invalid calendar date, malformed input is rejected at the wire
/// layer before a command exists.
pub(super) fn validate(cmd: &MovementCmd) -> Outcome<()> {
    let mut fields = FieldErrors::new();
    if !cmd.amount.is_positive() {
        fields.push("amount", "must be strictly positive");
    }
    if cmd.source_account_id == cmd.destination_account_id {
        fields.push(
            "destination_account_id",
            "must differ from source_account_id",
        );
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation(fields))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use crate::Money;

    use super::*;

    fn cmd(amount_cents: i64) -> MovementCmd {
        MovementCmd::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Money::new(amount_cents),
            NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
        )
    }

    #[test]
    fn accepts_a_well_formed_command() {
        assert!(validate(&cmd(100_00)).is_ok());
    }

    #[test]
    fn rejects_non_positive_amounts() {
        for cents in [0, -1, -100_00] {
            let err = validate(&cmd(cents)).unwrap_err();
            let EngineError::Validation(fields) = err else {
                panic!("expected a validation error");
            };
            assert!(fields.get("amount").is_some());
        }
    }

    #[test]
    fn rejects_same_account_on_both_ends_and_collects_all_violations() {
        let account_id = Uuid::new_v4();
        let mut cmd = cmd(0);
        cmd.source_account_id = account_id;
        cmd.destination_account_id = account_id;

        let err = validate(&cmd).unwrap_err();
        let EngineError::Validation(fields) = err else {
            panic!("expected a validation error");
        };
        assert!(fields.get("amount").is_some());
        assert!(fields.get("destination_account_id").is_some());
    }
}
