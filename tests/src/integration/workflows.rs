//! # Workflow Scenarios
//!
//! End-to-end title transfer, encumbrance placement, and encumbrance
//! release across all three contracts.

#[cfg(test)]
mod tests {
    use crate::integration::{deploy, Registry};
    use lr_contracts::{
        DeedType, IssueDeedParams, MortgageState, TitleState, WorkflowError,
    };
    use lr_store::StoreError;
    use lr_types::PrincipalId;
    use tokio_stream::StreamExt;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    async fn issue_sale_deed(registry: &Registry, deed_number: &str, buyer: &str) {
        registry
            .deeds
            .issue(IssueDeedParams {
                deed_number: deed_number.to_string(),
                deed_type: DeedType::Sale,
                title_number: "T1".to_string(),
                parcel_id: "P1".to_string(),
                seller: Some("Alice".to_string()),
                buyer: Some(buyer.to_string()),
                lien_holder: None,
            })
            .await
            .unwrap();
    }

    /// Issue the title and encumber it via an apht deed.
    async fn encumbered_registry() -> Registry {
        let registry = deploy("notary-01");
        registry
            .deeds
            .issue_mortgage_deed("D2", "T1", "P1", "BankX")
            .await
            .unwrap();
        registry.titles.issue("T1", "P1", "Alice").await.unwrap();
        registry.titles.place_encumbrance("D2").await.unwrap();
        registry
    }

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    #[tokio::test]
    async fn test_sale_deed_transfers_ownership() {
        let registry = deploy("notary-01");
        issue_sale_deed(&registry, "D1", "Bob").await;
        registry.titles.issue("T1", "P1", "Alice").await.unwrap();

        let title = registry.titles.transfer_ownership("D1").await.unwrap();
        assert_eq!(title.owner, "Bob");
        assert_eq!(title.reference_deed_number.as_deref(), Some("D1"));

        let stored = registry.titles.lookup("T1", "P1").await.unwrap();
        assert_eq!(stored.owner, "Bob");
        assert_eq!(stored.creator, Some(PrincipalId::new("notary-01")));
    }

    #[tokio::test]
    async fn test_place_encumbrance_creates_companion_mortgage() {
        let registry = encumbered_registry().await;

        let title = registry.titles.lookup("T1", "P1").await.unwrap();
        assert_eq!(title.current_state, TitleState::Encumbered);
        assert_eq!(title.reference_deed_number.as_deref(), Some("D2"));

        let mortgage = registry.mortgages.lookup("MTG-T1").await.unwrap();
        assert_eq!(mortgage.title_number, "T1");
        assert_eq!(mortgage.parcel_id, "P1");
        assert_eq!(mortgage.lien_holder, "BankX");
        assert_eq!(mortgage.reference_deed_number, "D2");
        assert_eq!(mortgage.current_state, MortgageState::Active);
    }

    #[tokio::test]
    async fn test_release_returns_title_to_normal_and_voids_mortgage() {
        let registry = encumbered_registry().await;

        let title = registry
            .titles
            .release_encumbrance("T1", "P1")
            .await
            .unwrap();
        assert_eq!(title.current_state, TitleState::Normal);

        let mortgages = registry
            .mortgages
            .lookup_by_title_reference("T1", "P1")
            .await
            .unwrap();
        assert_eq!(mortgages.len(), 1);
        assert_eq!(mortgages[0].current_state, MortgageState::Void);
    }

    #[tokio::test]
    async fn test_release_on_originally_normal_title_always_fails() {
        let registry = deploy("notary-01");
        registry.titles.issue("T1", "P1", "Alice").await.unwrap();

        for _ in 0..2 {
            let result = registry.titles.release_encumbrance("T1", "P1").await;
            match result {
                Err(WorkflowError::InvalidTransition { reason }) => {
                    assert!(reason.contains("NORMAL"));
                }
                other => panic!("expected InvalidTransition, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_second_release_fails_after_roundtrip() {
        let registry = encumbered_registry().await;
        registry
            .titles
            .release_encumbrance("T1", "P1")
            .await
            .unwrap();

        let result = registry.titles.release_encumbrance("T1", "P1").await;
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));
    }

    #[tokio::test]
    async fn test_transfer_works_on_encumbered_title() {
        let registry = encumbered_registry().await;
        issue_sale_deed(&registry, "D3", "Carol").await;

        let title = registry.titles.transfer_ownership("D3").await.unwrap();
        assert_eq!(title.owner, "Carol");
        // Transfer leaves the state field untouched.
        assert_eq!(title.current_state, TitleState::Encumbered);
    }

    #[tokio::test]
    async fn test_failed_companion_registration_leaves_title_encumbered() {
        let registry = deploy("notary-01");
        registry
            .deeds
            .issue_mortgage_deed("D2", "T1", "P1", "BankX")
            .await
            .unwrap();
        registry.titles.issue("T1", "P1", "Alice").await.unwrap();

        // Occupy the companion mortgage's key so registration collides.
        registry
            .mortgages
            .register("MTG-T1", "T1", "P1", "BankZ", "D0")
            .await
            .unwrap();

        let result = registry.titles.place_encumbrance("D2").await;
        assert!(matches!(
            result,
            Err(WorkflowError::RemoteInvocation { .. })
        ));

        // The local write is not rolled back.
        let title = registry.titles.lookup("T1", "P1").await.unwrap();
        assert_eq!(title.current_state, TitleState::Encumbered);
    }

    #[tokio::test]
    async fn test_encumber_twice_is_rejected_before_any_write() {
        let registry = encumbered_registry().await;
        registry
            .deeds
            .issue_mortgage_deed("D4", "T1", "P1", "BankY")
            .await
            .unwrap();

        let result = registry.titles.place_encumbrance("D4").await;
        assert!(matches!(
            result,
            Err(WorkflowError::InvalidTransition { .. })
        ));

        // Still referencing the first encumbrance deed.
        let title = registry.titles.lookup("T1", "P1").await.unwrap();
        assert_eq!(title.reference_deed_number.as_deref(), Some("D2"));
    }

    // =========================================================================
    // AUDIT HISTORY
    // =========================================================================

    #[tokio::test]
    async fn test_title_history_replays_ownership_changes() {
        let registry = deploy("notary-01");
        issue_sale_deed(&registry, "D1", "Bob").await;
        registry.titles.issue("T1", "P1", "Alice").await.unwrap();
        registry.titles.transfer_ownership("D1").await.unwrap();

        let mut history = registry.titles.audit_history("T1", "P1").await.unwrap();
        let mut owners = Vec::new();
        let mut tx_ids = Vec::new();
        while let Some(entry) = history.next().await {
            let entry = entry.unwrap();
            tx_ids.push(entry.tx_id);
            owners.push(entry.record.unwrap().owner);
        }
        assert_eq!(owners, vec!["Alice", "Bob"]);
        assert_ne!(tx_ids[0], tx_ids[1]);
    }

    #[tokio::test]
    async fn test_mortgage_history_replays_lifecycle() {
        let registry = encumbered_registry().await;
        registry
            .titles
            .release_encumbrance("T1", "P1")
            .await
            .unwrap();

        let mut history = registry.mortgages.audit_history("MTG-T1").await.unwrap();
        let mut states = Vec::new();
        while let Some(entry) = history.next().await {
            states.push(entry.unwrap().record.unwrap().current_state);
        }
        assert_eq!(states, vec![MortgageState::Active, MortgageState::Void]);
    }

    // =========================================================================
    // BULK QUERIES
    // =========================================================================

    #[tokio::test]
    async fn test_query_all_is_per_resource() {
        let registry = encumbered_registry().await;

        let deeds = registry.deeds.query_all().await.unwrap();
        assert_eq!(deeds.len(), 1);

        let titles = registry.titles.query_all().await.unwrap();
        assert_eq!(titles.len(), 1);

        let mortgages = registry.mortgages.query_all().await.unwrap();
        assert_eq!(mortgages.len(), 1);
        assert_eq!(mortgages[0].record.mortgage_number, "MTG-T1");
    }

    #[tokio::test]
    async fn test_deed_is_immutable_by_reissue() {
        let registry = deploy("notary-01");
        issue_sale_deed(&registry, "D1", "Bob").await;

        let result = registry
            .deeds
            .issue(IssueDeedParams {
                deed_number: "D1".to_string(),
                deed_type: DeedType::Sale,
                title_number: "T1".to_string(),
                parcel_id: "P1".to_string(),
                seller: Some("Mallory".to_string()),
                buyer: Some("Mallory".to_string()),
                lien_holder: None,
            })
            .await;
        assert!(matches!(
            result,
            Err(WorkflowError::Store(StoreError::DuplicateKey { .. }))
        ));

        let deed = registry.deeds.lookup("D1").await.unwrap();
        assert_eq!(deed.buyer.as_deref(), Some("Bob"));
    }
}
