//! The intake engine
//!
//! Drives one conversation per session id through address intake, service
//! selection, meter readings and bill history. The transport calls
//! [`IntakeEngine::on_start`], [`IntakeEngine::on_text_input`],
//! [`IntakeEngine::on_choice`] and [`IntakeEngine::on_reset`]; the engine
//! answers through the [`ConversationDriver`] port.
//!
//! Recovery rules: unparseable input re-prompts the same state; a storage
//! or missing-data failure aborts the flow with a generic retry message and
//! clears the session; input with no matching transition is a logged no-op.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::application::ports::{ConversationDriver, PromptChoice};
use crate::application::receipt;
use crate::application::services::BillingService;
use crate::application::session::SharedSessionRegistry;
use crate::domain::{
    Address, BillBreakdown, DomainError, DomainResult, NewAddress, RepositoryProvider,
    TariffTable,
};

use super::session::IntakeSession;
use super::state::{optional_field, ChoiceToken, IntakeState, MeterVariant, ServiceChoice};

const PROMPT_CITY: &str = "Enter the city name:";
const PROMPT_STREET: &str = "Enter the street:";
const PROMPT_HOUSE: &str = "Enter the house number:";
const PROMPT_ENTRANCE: &str = "Enter the entrance number (or '-' if none):";
const PROMPT_FLOOR: &str = "Enter the floor (or '-' if none):";
const PROMPT_APARTMENT: &str = "Enter the apartment number (or '-' if none):";
const PROMPT_UNLOADS: &str = "Enter the number of unloads:";
const PROMPT_BINS: &str = "Enter the number of trash bins:";
const RETRY_NUMERIC: &str = "Please enter a numeric value.";
const RETRY_INTEGER: &str = "Please enter a whole non-negative number.";
const RETRY_GENERIC: &str = "Something went wrong. Please try again with /start.";
const RETRY_PREVIOUS_ABOVE_CURRENT: &str =
    "The previous reading cannot be greater than the current one.";

pub struct IntakeEngine {
    repos: Arc<dyn RepositoryProvider>,
    billing: Arc<BillingService>,
    driver: Arc<dyn ConversationDriver>,
    sessions: SharedSessionRegistry,
    tariffs: TariffTable,
}

impl IntakeEngine {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        billing: Arc<BillingService>,
        driver: Arc<dyn ConversationDriver>,
        sessions: SharedSessionRegistry,
        tariffs: TariffTable,
    ) -> Self {
        Self {
            repos,
            billing,
            driver,
            sessions,
            tariffs,
        }
    }

    // ── Inbound port ───────────────────────────────────────────

    /// Entry point: register the user, offer stored addresses or start the
    /// address form. Replaces any session in progress for this id.
    pub async fn on_start(&self, session_id: &str, chat_id: i64, display_name: &str) {
        let result = self.start_flow(session_id, chat_id, display_name).await;
        if let Err(e) = result {
            self.fail(session_id, e).await;
        }
    }

    /// Free-text answer for the current state.
    pub async fn on_text_input(&self, session_id: &str, text: &str) {
        let Some(mut session) = self.sessions.get(session_id) else {
            debug!(session_id, "Text input without an active session");
            self.driver
                .prompt(session_id, "Send /start to begin.", &[])
                .await;
            return;
        };
        session.touch();

        match self.handle_text(session_id, &mut session, text).await {
            Ok(()) => self.sessions.put(session_id, session),
            Err(e) if !e.aborts_flow() => {
                // Retry in place: keep the state, ask again with the reason.
                debug!(session_id, error = %e, "Input rejected, re-prompting");
                self.sessions.put(session_id, session);
                self.driver.prompt(session_id, &e.to_string(), &[]).await;
            }
            Err(e) => self.fail(session_id, e).await,
        }
    }

    /// Selection of a previously offered choice token.
    pub async fn on_choice(&self, session_id: &str, token: &str) {
        let Some(choice) = ChoiceToken::parse(token) else {
            debug!(session_id, token, "Unknown choice token ignored");
            return;
        };
        let Some(mut session) = self.sessions.get(session_id) else {
            debug!(session_id, "Choice without an active session");
            self.driver
                .prompt(session_id, "Send /start to begin.", &[])
                .await;
            return;
        };
        session.touch();

        match self.handle_choice(session_id, &mut session, choice).await {
            Ok(()) => self.sessions.put(session_id, session),
            Err(e) => self.fail(session_id, e).await,
        }
    }

    /// Explicit reset: drop the session so the next /start is a clean entry.
    pub async fn on_reset(&self, session_id: &str) {
        self.sessions.remove(session_id);
        self.driver
            .prompt(session_id, "Session cleared. Send /start to begin.", &[])
            .await;
    }

    // ── Flow steps ─────────────────────────────────────────────

    async fn start_flow(
        &self,
        session_id: &str,
        chat_id: i64,
        display_name: &str,
    ) -> DomainResult<()> {
        let user = self
            .repos
            .users()
            .get_or_create(chat_id, display_name)
            .await?;
        let mut session = IntakeSession::new(user.id);

        let addresses = self.repos.addresses().list_for_user(user.id).await?;
        if addresses.is_empty() {
            session.state = IntakeState::AwaitCity;
            self.driver
                .prompt(
                    session_id,
                    &format!("No saved addresses found. {}", PROMPT_CITY),
                    &[],
                )
                .await;
        } else {
            session.state = IntakeState::SelectAddress;
            let mut choices: Vec<PromptChoice> = addresses
                .iter()
                .map(|a| PromptChoice::new(a.summary(), format!("select_address_{}", a.id)))
                .collect();
            choices.push(PromptChoice::new("Add a new address", "add_new_address"));
            self.driver
                .prompt(session_id, "Your saved addresses:", &choices)
                .await;
        }

        self.sessions.put(session_id, session);
        Ok(())
    }

    async fn handle_text(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
        text: &str,
    ) -> DomainResult<()> {
        match session.state.clone() {
            IntakeState::AwaitCity => {
                self.capture_required(session_id, session, text, PROMPT_CITY, PROMPT_STREET, |s, v| {
                    s.form.city = Some(v);
                    s.state = IntakeState::AwaitStreet;
                })
                .await
            }
            IntakeState::AwaitStreet => {
                self.capture_required(session_id, session, text, PROMPT_STREET, PROMPT_HOUSE, |s, v| {
                    s.form.street = Some(v);
                    s.state = IntakeState::AwaitHouse;
                })
                .await
            }
            IntakeState::AwaitHouse => {
                self.capture_required(
                    session_id,
                    session,
                    text,
                    PROMPT_HOUSE,
                    PROMPT_ENTRANCE,
                    |s, v| {
                        s.form.house = Some(v);
                        s.state = IntakeState::AwaitEntrance;
                    },
                )
                .await
            }
            IntakeState::AwaitEntrance => {
                session.form.entrance = optional_field(text);
                session.state = IntakeState::AwaitFloor;
                self.driver.prompt(session_id, PROMPT_FLOOR, &[]).await;
                Ok(())
            }
            IntakeState::AwaitFloor => {
                session.form.floor = optional_field(text);
                session.state = IntakeState::AwaitApartment;
                self.driver.prompt(session_id, PROMPT_APARTMENT, &[]).await;
                Ok(())
            }
            IntakeState::AwaitApartment => {
                session.form.apartment = optional_field(text);
                let address = self.create_address(session).await?;
                session.address_id = Some(address.id);
                session.state = IntakeState::AwaitServiceChoice;
                self.prompt_service_menu(session_id, &address).await;
                Ok(())
            }
            IntakeState::AwaitReading { index } => {
                self.handle_reading(session_id, session, index, text).await
            }
            IntakeState::AwaitUnloads => match parse_count(text) {
                Some(unloads) => {
                    session.unloads = Some(unloads);
                    session.state = IntakeState::AwaitBins;
                    self.driver.prompt(session_id, PROMPT_BINS, &[]).await;
                    Ok(())
                }
                None => {
                    self.driver.prompt(session_id, RETRY_INTEGER, &[]).await;
                    Ok(())
                }
            },
            IntakeState::AwaitBins => match parse_count(text) {
                Some(bins) => {
                    let unloads = session
                        .unloads
                        .ok_or(DomainError::MissingSessionData("unloads"))?;
                    let breakdown = self.tariffs.trash_bill(unloads, bins)?;
                    self.finalize(session_id, session, breakdown).await
                }
                None => {
                    self.driver.prompt(session_id, RETRY_INTEGER, &[]).await;
                    Ok(())
                }
            },
            state @ (IntakeState::Idle
            | IntakeState::SelectAddress
            | IntakeState::AwaitServiceChoice
            | IntakeState::AwaitVariantChoice
            | IntakeState::SelectBill) => {
                debug!(session_id, ?state, "No text transition from this state; input ignored");
                Ok(())
            }
        }
    }

    async fn handle_choice(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
        choice: ChoiceToken,
    ) -> DomainResult<()> {
        match (session.state.clone(), choice) {
            (IntakeState::SelectAddress, ChoiceToken::SelectAddress(id)) => {
                match self.repos.addresses().find_by_id(id).await? {
                    Some(address) => {
                        session.address_id = Some(address.id);
                        session.state = IntakeState::AwaitServiceChoice;
                        self.prompt_service_menu(session_id, &address).await;
                    }
                    None => {
                        session.reset_flow();
                        self.driver
                            .prompt(
                                session_id,
                                "Address not found. Send /start to choose again.",
                                &[],
                            )
                            .await;
                    }
                }
                Ok(())
            }
            (IntakeState::SelectAddress, ChoiceToken::AddNewAddress) => {
                session.state = IntakeState::AwaitCity;
                self.driver.prompt(session_id, PROMPT_CITY, &[]).await;
                Ok(())
            }
            (IntakeState::AwaitServiceChoice, ChoiceToken::Service(service)) => {
                self.start_service(session_id, session, service).await
            }
            (IntakeState::AwaitVariantChoice, ChoiceToken::Meter(variant)) => {
                self.start_readings(session_id, session, variant).await;
                Ok(())
            }
            (IntakeState::SelectBill, ChoiceToken::BillDetail(id)) => {
                match self.billing.detail(id).await? {
                    Some(bill) => {
                        let text = receipt::detail_text(&bill, &self.tariffs.currency);
                        self.driver.show_receipt(session_id, &text).await;
                        session.reset_flow();
                        self.driver
                            .prompt(session_id, "Send /start to begin a new calculation.", &[])
                            .await;
                    }
                    None => {
                        self.driver.prompt(session_id, "Bill not found.", &[]).await;
                    }
                }
                Ok(())
            }
            (state, choice) => {
                debug!(session_id, ?state, ?choice, "No transition for choice; ignored");
                Ok(())
            }
        }
    }

    async fn start_service(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
        service: ServiceChoice,
    ) -> DomainResult<()> {
        match service {
            ServiceChoice::Electricity => {
                session.state = IntakeState::AwaitVariantChoice;
                let choices = [
                    PromptChoice::new("Single-zone", "meter_single_zone"),
                    PromptChoice::new("Two-zone (day/night)", "meter_two_zone"),
                    PromptChoice::new("Three-zone (peak/day/night)", "meter_three_zone"),
                ];
                self.driver
                    .prompt(session_id, "Choose the electricity meter type:", &choices)
                    .await;
                Ok(())
            }
            ServiceChoice::Gas => {
                self.start_readings(session_id, session, MeterVariant::Gas)
                    .await;
                Ok(())
            }
            ServiceChoice::Trash => {
                session.state = IntakeState::AwaitUnloads;
                self.driver.prompt(session_id, PROMPT_UNLOADS, &[]).await;
                Ok(())
            }
            ServiceChoice::Bills => self.show_history(session_id, session).await,
        }
    }

    async fn start_readings(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
        variant: MeterVariant,
    ) {
        session.variant = Some(variant);
        session.readings.clear();
        session.state = IntakeState::AwaitReading { index: 0 };
        self.driver
            .prompt(session_id, &variant.plan()[0].prompt(), &[])
            .await;
    }

    async fn handle_reading(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
        index: usize,
        text: &str,
    ) -> DomainResult<()> {
        let variant = session
            .variant
            .ok_or(DomainError::MissingSessionData("meter variant"))?;
        let plan = variant.plan();
        let slot = plan
            .get(index)
            .ok_or(DomainError::MissingSessionData("reading plan slot"))?;

        let value: Decimal = match text.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                self.driver.prompt(session_id, RETRY_NUMERIC, &[]).await;
                return Ok(());
            }
        };
        if value < Decimal::ZERO {
            self.driver
                .prompt(session_id, "Readings cannot be negative.", &[])
                .await;
            return Ok(());
        }
        if let Some(current_index) = variant.paired_current(index) {
            let current = session
                .readings
                .get(current_index)
                .copied()
                .ok_or(DomainError::MissingSessionData("current reading"))?;
            if value > current {
                self.driver
                    .prompt(
                        session_id,
                        &format!("{} {}", RETRY_PREVIOUS_ABOVE_CURRENT, slot.prompt()),
                        &[],
                    )
                    .await;
                return Ok(());
            }
        }

        session.readings.push(value);
        let next = index + 1;
        if next < plan.len() {
            session.state = IntakeState::AwaitReading { index: next };
            self.driver
                .prompt(session_id, &plan[next].prompt(), &[])
                .await;
            Ok(())
        } else {
            let breakdown = match compute(&self.tariffs, variant, &session.readings) {
                Ok(b) => b,
                Err(e) => {
                    // Keep the session retryable at the last slot.
                    session.readings.pop();
                    return Err(e);
                }
            };
            self.finalize(session_id, session, breakdown).await
        }
    }

    async fn show_history(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
    ) -> DomainResult<()> {
        let address_id = session
            .address_id
            .ok_or(DomainError::MissingSessionData("address"))?;
        let rows = self.billing.history(address_id).await?;
        if rows.is_empty() {
            session.reset_flow();
            self.driver
                .prompt(
                    session_id,
                    "No bills found for this address. Send /start to choose an address.",
                    &[],
                )
                .await;
        } else {
            session.state = IntakeState::SelectBill;
            let choices: Vec<PromptChoice> = rows
                .iter()
                .map(|s| {
                    PromptChoice::new(
                        receipt::summary_row(s, &self.tariffs.currency),
                        format!("bill_detail_{}", s.id),
                    )
                })
                .collect();
            self.driver
                .prompt(session_id, "Your saved bills:", &choices)
                .await;
        }
        Ok(())
    }

    async fn finalize(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
        breakdown: BillBreakdown,
    ) -> DomainResult<()> {
        let address_id = session
            .address_id
            .ok_or(DomainError::MissingSessionData("address"))?;
        let bill = self
            .billing
            .finalize(session.user_id, address_id, breakdown)
            .await?;
        let text = receipt::receipt_text(&bill.breakdown, bill.created_at, &self.tariffs.currency);
        self.driver.show_receipt(session_id, &text).await;
        session.reset_flow();
        self.driver
            .prompt(session_id, "Send /start to begin a new calculation.", &[])
            .await;
        Ok(())
    }

    // ── Helpers ────────────────────────────────────────────────

    /// Capture a required free-text field: empty input re-prompts, anything
    /// else is stored and the next question asked.
    async fn capture_required(
        &self,
        session_id: &str,
        session: &mut IntakeSession,
        text: &str,
        same_prompt: &str,
        next_prompt: &str,
        apply: impl FnOnce(&mut IntakeSession, String),
    ) -> DomainResult<()> {
        let value = text.trim();
        if value.is_empty() {
            self.driver.prompt(session_id, same_prompt, &[]).await;
            return Ok(());
        }
        apply(session, value.to_string());
        self.driver.prompt(session_id, next_prompt, &[]).await;
        Ok(())
    }

    async fn create_address(&self, session: &mut IntakeSession) -> DomainResult<Address> {
        let form = &mut session.form;
        let city = form
            .city
            .take()
            .ok_or(DomainError::MissingSessionData("city"))?;
        let street = form
            .street
            .take()
            .ok_or(DomainError::MissingSessionData("street"))?;
        let house = form
            .house
            .take()
            .ok_or(DomainError::MissingSessionData("house"))?;
        self.repos
            .addresses()
            .create(NewAddress {
                user_id: session.user_id,
                city,
                street,
                house,
                entrance: form.entrance.take(),
                floor: form.floor.take(),
                apartment: form.apartment.take(),
            })
            .await
    }

    async fn prompt_service_menu(&self, session_id: &str, address: &Address) {
        let choices = [
            PromptChoice::new("Electricity", "service_electricity"),
            PromptChoice::new("Gas", "service_gas"),
            PromptChoice::new("Trash removal", "service_trash"),
            PromptChoice::new("My bills", "service_bills"),
        ];
        self.driver
            .prompt(
                session_id,
                &format!("Choose a utility service for {}:", address.summary()),
                &choices,
            )
            .await;
    }

    /// Abort the flow: log, clear the session, surface a generic retry.
    async fn fail(&self, session_id: &str, error: DomainError) {
        warn!(session_id, %error, "Intake flow aborted");
        self.sessions.remove(session_id);
        self.driver.prompt(session_id, RETRY_GENERIC, &[]).await;
    }
}

/// Non-negative whole number (trash unloads / bins).
fn parse_count(text: &str) -> Option<u32> {
    let trimmed = text.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Assemble the breakdown from plan-ordered readings.
fn compute(
    tariffs: &TariffTable,
    variant: MeterVariant,
    readings: &[Decimal],
) -> DomainResult<BillBreakdown> {
    let r = |i: usize| {
        readings
            .get(i)
            .copied()
            .ok_or(DomainError::MissingSessionData("meter reading"))
    };
    match variant {
        MeterVariant::SingleZone => tariffs.single_zone(r(0)?, r(1)?),
        // plan order: currents first, then previouses
        MeterVariant::TwoZone => tariffs.two_zone(r(0)?, r(2)?, r(1)?, r(3)?),
        MeterVariant::ThreeZone => {
            tariffs.three_zone(r(0)?, r(3)?, r(1)?, r(4)?, r(2)?, r(5)?)
        }
        MeterVariant::Gas => tariffs.gas_bill(r(0)?, r(1)?),
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::application::session::SessionRegistry;
    use crate::infrastructure::memory::InMemoryRepositoryProvider;

    const SID: &str = "chat-1";

    /// Driver that records everything the engine sends.
    #[derive(Default)]
    struct RecordingDriver {
        prompts: Mutex<Vec<(String, Vec<PromptChoice>)>>,
        receipts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ConversationDriver for RecordingDriver {
        async fn prompt(&self, _session_id: &str, text: &str, choices: &[PromptChoice]) {
            self.prompts
                .lock()
                .unwrap()
                .push((text.to_string(), choices.to_vec()));
        }

        async fn show_receipt(&self, _session_id: &str, text: &str) {
            self.receipts.lock().unwrap().push(text.to_string());
        }
    }

    impl RecordingDriver {
        fn last_prompt(&self) -> String {
            self.prompts.lock().unwrap().last().unwrap().0.clone()
        }

        fn last_choices(&self) -> Vec<PromptChoice> {
            self.prompts.lock().unwrap().last().unwrap().1.clone()
        }

        fn receipts(&self) -> Vec<String> {
            self.receipts.lock().unwrap().clone()
        }
    }

    struct Fixture {
        engine: IntakeEngine,
        driver: Arc<RecordingDriver>,
        repos: Arc<InMemoryRepositoryProvider>,
        sessions: SharedSessionRegistry,
    }

    fn fixture() -> Fixture {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let driver = Arc::new(RecordingDriver::default());
        let sessions = SessionRegistry::shared();
        let billing = Arc::new(BillingService::new(repos.clone()));
        let engine = IntakeEngine::new(
            repos.clone(),
            billing,
            driver.clone(),
            sessions.clone(),
            TariffTable::default(),
        );
        Fixture {
            engine,
            driver,
            repos,
            sessions,
        }
    }

    impl Fixture {
        fn state(&self) -> IntakeState {
            self.sessions.get(SID).unwrap().state
        }

        /// Walk the address form up to the service menu.
        async fn enter_address(&self) {
            self.engine.on_start(SID, 100, "Olena").await;
            for answer in ["Kyiv", "Khreshchatyk", "12", "-", "-", "7"] {
                self.engine.on_text_input(SID, answer).await;
            }
        }
    }

    #[tokio::test]
    async fn new_user_starts_with_address_form() {
        let fx = fixture();
        fx.engine.on_start(SID, 100, "Olena").await;
        assert_eq!(fx.state(), IntakeState::AwaitCity);
        assert!(fx.driver.last_prompt().contains("Enter the city name"));
    }

    #[tokio::test]
    async fn address_form_leads_to_service_menu() {
        let fx = fixture();
        fx.enter_address().await;
        assert_eq!(fx.state(), IntakeState::AwaitServiceChoice);
        let prompt = fx.driver.last_prompt();
        assert!(prompt.contains("Kyiv, Khreshchatyk, 12, apt. 7"));
        assert_eq!(fx.driver.last_choices().len(), 4);
    }

    #[tokio::test]
    async fn sentinel_address_fields_are_stored_empty() {
        let fx = fixture();
        fx.enter_address().await;
        let user = fx.repos.users().get_or_create(100, "Olena").await.unwrap();
        let addresses = fx.repos.addresses().list_for_user(user.id).await.unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].entrance, None);
        assert_eq!(addresses[0].floor, None);
        assert_eq!(addresses[0].apartment.as_deref(), Some("7"));
    }

    #[tokio::test]
    async fn single_zone_flow_produces_receipt_and_bill() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_electricity").await;
        assert_eq!(fx.state(), IntakeState::AwaitVariantChoice);
        fx.engine.on_choice(SID, "meter_single_zone").await;
        fx.engine.on_text_input(SID, "150").await;
        fx.engine.on_text_input(SID, "100").await;

        let receipts = fx.driver.receipts();
        assert_eq!(receipts.len(), 1);
        assert!(receipts[0].contains("Consumed: 50 kWh"));
        assert!(receipts[0].contains("Total: 216.00 UAH"));
        assert_eq!(fx.state(), IntakeState::Idle);

        let user = fx.repos.users().get_or_create(100, "Olena").await.unwrap();
        let address = &fx.repos.addresses().list_for_user(user.id).await.unwrap()[0];
        let bills = fx.repos.bills().list_for_address(address.id).await.unwrap();
        assert_eq!(bills.len(), 1);
        assert_eq!(bills[0].service, "Electricity");
    }

    #[tokio::test]
    async fn two_zone_flow_totals_both_zones() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_electricity").await;
        fx.engine.on_choice(SID, "meter_two_zone").await;
        // currents first (day, night), then previouses (day, night)
        for value in ["250", "130", "200", "100"] {
            fx.engine.on_text_input(SID, value).await;
        }
        let receipts = fx.driver.receipts();
        assert!(receipts[0].contains("Total: 280.80 UAH"));
    }

    #[tokio::test]
    async fn gas_flow_skips_variant_choice() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_gas").await;
        assert_eq!(fx.state(), IntakeState::AwaitReading { index: 0 });
        assert!(fx.driver.last_prompt().contains("gas meter"));
        fx.engine.on_text_input(SID, "520").await;
        fx.engine.on_text_input(SID, "500").await;
        assert!(fx.driver.receipts()[0].contains("Total: 185.36 UAH"));
    }

    #[tokio::test]
    async fn trash_flow_multiplies_unloads_bins_rate() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_trash").await;
        fx.engine.on_text_input(SID, "4").await;
        fx.engine.on_text_input(SID, "2").await;
        assert!(fx.driver.receipts()[0].contains("Total: 1320.00 UAH"));
    }

    #[tokio::test]
    async fn non_numeric_reading_reprompts_without_advancing() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_gas").await;
        fx.engine.on_text_input(SID, "not a number").await;
        assert_eq!(fx.state(), IntakeState::AwaitReading { index: 0 });
        assert_eq!(fx.driver.last_prompt(), RETRY_NUMERIC);
        assert!(fx.driver.receipts().is_empty());
    }

    #[tokio::test]
    async fn oversized_reading_reprompts_with_the_reason() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_gas").await;
        // Near Decimal::MAX; billing it overflows and must re-prompt,
        // not panic or fall back to the generic numeric hint.
        fx.engine
            .on_text_input(SID, "79000000000000000000000000000")
            .await;
        fx.engine.on_text_input(SID, "0").await;

        assert_eq!(fx.state(), IntakeState::AwaitReading { index: 1 });
        let session = fx.sessions.get(SID).unwrap();
        assert_eq!(session.readings.len(), 1);
        assert!(fx.driver.last_prompt().contains("too large to bill"));
        assert!(fx.driver.receipts().is_empty());
    }

    #[tokio::test]
    async fn previous_above_current_reprompts_without_a_bill() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_electricity").await;
        fx.engine.on_choice(SID, "meter_single_zone").await;
        fx.engine.on_text_input(SID, "100").await;
        fx.engine.on_text_input(SID, "150").await;
        assert_eq!(fx.state(), IntakeState::AwaitReading { index: 1 });
        assert!(fx
            .driver
            .last_prompt()
            .contains("previous reading cannot be greater"));
        assert!(fx.driver.receipts().is_empty());
        // a valid retry completes the flow
        fx.engine.on_text_input(SID, "90").await;
        assert_eq!(fx.driver.receipts().len(), 1);
    }

    #[tokio::test]
    async fn non_integer_trash_counts_are_rejected() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_trash").await;
        fx.engine.on_text_input(SID, "4.5").await;
        assert_eq!(fx.state(), IntakeState::AwaitUnloads);
        assert_eq!(fx.driver.last_prompt(), RETRY_INTEGER);
    }

    #[tokio::test]
    async fn returning_user_selects_stored_address() {
        let fx = fixture();
        let user = fx.repos.users().get_or_create(100, "Olena").await.unwrap();
        let address = fx
            .repos
            .addresses()
            .create(NewAddress {
                user_id: user.id,
                city: "Lviv".into(),
                street: "Rynok".into(),
                house: "1".into(),
                entrance: None,
                floor: None,
                apartment: None,
            })
            .await
            .unwrap();

        fx.engine.on_start(SID, 100, "Olena").await;
        assert_eq!(fx.state(), IntakeState::SelectAddress);
        // one stored address plus "Add a new address"
        assert_eq!(fx.driver.last_choices().len(), 2);

        fx.engine
            .on_choice(SID, &format!("select_address_{}", address.id))
            .await;
        assert_eq!(fx.state(), IntakeState::AwaitServiceChoice);
        assert!(fx.driver.last_prompt().contains("Lviv, Rynok, 1"));
    }

    #[tokio::test]
    async fn bill_history_lists_and_shows_detail() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "service_gas").await;
        fx.engine.on_text_input(SID, "520").await;
        fx.engine.on_text_input(SID, "500").await;

        // restart and browse history for the stored address
        fx.engine.on_start(SID, 100, "Olena").await;
        let select_token = fx.driver.last_choices()[0].token.clone();
        fx.engine.on_choice(SID, &select_token).await;
        fx.engine.on_choice(SID, "service_bills").await;
        assert_eq!(fx.state(), IntakeState::SelectBill);

        let detail_token = fx.driver.last_choices()[0].token.clone();
        assert!(detail_token.starts_with("bill_detail_"));
        fx.engine.on_choice(SID, &detail_token).await;

        let receipts = fx.driver.receipts();
        assert!(receipts.last().unwrap().starts_with("Bill #"));
        assert!(receipts.last().unwrap().contains("Total: 185.36 UAH"));
        assert_eq!(fx.state(), IntakeState::Idle);
    }

    #[tokio::test]
    async fn choice_with_no_transition_is_ignored() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_choice(SID, "meter_two_zone").await;
        assert_eq!(fx.state(), IntakeState::AwaitServiceChoice);
        fx.engine.on_choice(SID, "complete nonsense").await;
        assert_eq!(fx.state(), IntakeState::AwaitServiceChoice);
    }

    #[tokio::test]
    async fn reset_clears_the_session() {
        let fx = fixture();
        fx.enter_address().await;
        fx.engine.on_reset(SID).await;
        assert!(fx.sessions.get(SID).is_none());
    }
}
