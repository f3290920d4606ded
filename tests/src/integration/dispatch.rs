//! # Dispatch Flows
//!
//! Drives the contracts the way an external client does: by operation
//! name and ordered string arguments through the transport, decoding the
//! reply envelope and payload frame structurally.

#[cfg(test)]
mod tests {
    use crate::integration::{deploy, Registry};
    use lr_contracts::{ContractTransport, Deed, LandTitle, Mortgage, TitleState};
    use lr_types::{ContractId, Entity, PayloadFrame, ReplyEnvelope};

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    async fn invoke(registry: &Registry, contract: &str, operation: &str, a: &[&str]) -> ReplyEnvelope {
        registry
            .network
            .invoke(
                &ContractId::new(contract),
                operation,
                &args(a),
                &registry.channel,
            )
            .await
            .unwrap()
    }

    fn decode<T: Entity>(reply: &ReplyEnvelope) -> T {
        assert!(reply.status.is_success(), "reply failed: {:?}", reply.message);
        let frame = PayloadFrame::decode(&reply.payload).unwrap();
        T::from_bytes(&frame.data).unwrap()
    }

    #[tokio::test]
    async fn test_full_encumbrance_flow_by_operation_name() {
        let registry = deploy("notary-01");

        let reply = invoke(
            &registry,
            "deed-contract",
            "issue-mortgage-deed",
            &["D2", "T1", "P1", "BankX"],
        )
        .await;
        let deed: Deed = decode(&reply);
        assert!(deed.is_mortgage_origination());

        let reply = invoke(
            &registry,
            "title-contract",
            "issue",
            &["T1", "P1", "Alice"],
        )
        .await;
        let title: LandTitle = decode(&reply);
        assert_eq!(title.current_state, TitleState::Normal);

        let reply = invoke(&registry, "title-contract", "place-encumbrance", &["D2"]).await;
        let title: LandTitle = decode(&reply);
        assert_eq!(title.current_state, TitleState::Encumbered);

        let reply = invoke(
            &registry,
            "mortgage-contract",
            "lookup-by-title-reference",
            &["T1", "P1"],
        )
        .await;
        assert!(reply.status.is_success());
        let frame = PayloadFrame::decode(&reply.payload).unwrap();
        let mortgages: Vec<Mortgage> = serde_json::from_slice(&frame.data).unwrap();
        assert_eq!(mortgages.len(), 1);
        assert_eq!(mortgages[0].lien_holder, "BankX");
    }

    #[tokio::test]
    async fn test_sale_flow_by_operation_name() {
        let registry = deploy("notary-01");

        invoke(
            &registry,
            "deed-contract",
            "issue",
            &["D1", "jual-beli", "T1", "P1", "Alice", "Bob"],
        )
        .await;
        invoke(&registry, "title-contract", "issue", &["T1", "P1", "Alice"]).await;

        let reply = invoke(&registry, "title-contract", "transfer-ownership", &["D1"]).await;
        let title: LandTitle = decode(&reply);
        assert_eq!(title.owner, "Bob");
        assert_eq!(title.reference_deed_number.as_deref(), Some("D1"));
    }

    #[tokio::test]
    async fn test_failure_travels_as_error_envelope() {
        let registry = deploy("notary-01");
        invoke(&registry, "title-contract", "issue", &["T1", "P1", "Alice"]).await;

        let reply = invoke(
            &registry,
            "title-contract",
            "release-encumbrance",
            &["T1", "P1"],
        )
        .await;
        assert!(!reply.status.is_success());
        assert!(reply.message.as_deref().unwrap_or_default().contains("NORMAL"));
        assert!(reply.payload.is_empty());
    }

    #[tokio::test]
    async fn test_query_all_returns_framed_list() {
        let registry = deploy("notary-01");
        invoke(
            &registry,
            "deed-contract",
            "issue",
            &["D1", "jual-beli", "T1", "P1", "Alice", "Bob"],
        )
        .await;

        let reply = invoke(&registry, "deed-contract", "query-all", &[]).await;
        assert!(reply.status.is_success());
        let frame = PayloadFrame::decode(&reply.payload).unwrap();
        let rows: serde_json::Value = serde_json::from_slice(&frame.data).unwrap();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["record"]["deed_number"], "D1");
        assert!(rows[0]["key"]
            .as_str()
            .unwrap()
            .starts_with("registry.deed"));
    }

    #[tokio::test]
    async fn test_audit_history_returns_framed_versions() {
        let registry = deploy("notary-01");
        invoke(
            &registry,
            "deed-contract",
            "issue",
            &["D1", "jual-beli", "T1", "P1", "Alice", "Bob"],
        )
        .await;

        let reply = invoke(&registry, "deed-contract", "audit-history", &["D1"]).await;
        assert!(reply.status.is_success());
        let frame = PayloadFrame::decode(&reply.payload).unwrap();
        let versions: serde_json::Value = serde_json::from_slice(&frame.data).unwrap();
        let versions = versions.as_array().unwrap();
        assert_eq!(versions.len(), 1);
        assert!(versions[0]["tx_id"].as_str().is_some());
        assert_eq!(versions[0]["record"]["deed_number"], "D1");
    }

    #[tokio::test]
    async fn test_unknown_operation_is_error_envelope() {
        let registry = deploy("notary-01");
        let reply = invoke(&registry, "deed-contract", "burn", &[]).await;
        assert!(!reply.status.is_success());
        assert!(reply.message.as_deref().unwrap_or_default().contains("burn"));
    }
}
