//! Controller behaviour against a scripted in-memory API.
//!
//! Time is paused, so response delays and the debounce window are exact and
//! completion order is fully controlled by the script.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use dig_auth::{MemoryStore, Session};
use dig_client::{ClientError, DiscoveryApi, DiscoveryQuery, FilterParams};
use dig_core::{Discovery, DiscoveryDraft, DiscoveryId, DiscoveryType, Era};
use dig_view::{
    Field, MapController, MapEvent, MarkerIcon, Operation, PanelError, PanelState, Settled,
};
use pretty_assertions::assert_eq;

const ADMIN_TOKEN: &str = "eyJhbGciOiJIUzI1NiJ9.eyJyb2xlIjoiQURNSU4ifQ.sig";
const WINDOW: Duration = Duration::from_millis(300);

#[derive(Clone)]
enum Reply {
    List(Vec<Discovery>),
    Status(u16),
}

struct Route {
    query: DiscoveryQuery,
    delay: Duration,
    reply: Reply,
}

#[derive(Default)]
struct ScriptedApi {
    routes: Mutex<Vec<Route>>,
    reads: Mutex<Vec<DiscoveryQuery>>,
    updates: Mutex<Vec<(DiscoveryId, DiscoveryDraft)>>,
    deletes: Mutex<Vec<DiscoveryId>>,
    reject_mutations: bool,
}

impl ScriptedApi {
    fn route(self, query: DiscoveryQuery, delay_ms: u64, reply: Reply) -> Self {
        self.routes.lock().unwrap().push(Route {
            query,
            delay: Duration::from_millis(delay_ms),
            reply,
        });
        self
    }

    fn reads(&self) -> Vec<DiscoveryQuery> {
        self.reads.lock().unwrap().clone()
    }

    fn authorize(session: &Session) -> Result<(), ClientError> {
        session
            .bearer()
            .map(|_| ())
            .ok_or(ClientError::MissingCredential)
    }

    fn mutation_result(&self) -> Result<(), ClientError> {
        if self.reject_mutations {
            Err(ClientError::Unauthorized {
                status: 403,
                message: "forbidden".into(),
            })
        } else {
            Ok(())
        }
    }
}

impl DiscoveryApi for ScriptedApi {
    fn list_discoveries(
        &self,
        query: &DiscoveryQuery,
    ) -> impl Future<Output = Result<Vec<Discovery>, ClientError>> + Send {
        self.reads.lock().unwrap().push(query.clone());
        let (delay, reply) = self
            .routes
            .lock()
            .unwrap()
            .iter()
            .find(|route| &route.query == query)
            .map_or((Duration::ZERO, Reply::List(Vec::new())), |route| {
                (route.delay, route.reply.clone())
            });
        async move {
            tokio::time::sleep(delay).await;
            match reply {
                Reply::List(list) => Ok(list),
                Reply::Status(status) => Err(ClientError::Api {
                    status,
                    message: "scripted failure".into(),
                }),
            }
        }
    }

    fn update_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
        draft: &DiscoveryDraft,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let result = Self::authorize(session).and_then(|()| {
            self.updates
                .lock()
                .unwrap()
                .push((id.clone(), draft.clone()));
            self.mutation_result()
        });
        async move { result }
    }

    fn delete_discovery(
        &self,
        session: &Session,
        id: &DiscoveryId,
    ) -> impl Future<Output = Result<(), ClientError>> + Send {
        let result = Self::authorize(session).and_then(|()| {
            self.deletes.lock().unwrap().push(id.clone());
            self.mutation_result()
        });
        async move { result }
    }
}

fn site(id: &str, title: &str) -> Discovery {
    Discovery {
        id: DiscoveryId::new(id),
        title: title.into(),
        description: "Rock-cut water channel".into(),
        latitude: 31.7767,
        longitude: 35.2345,
        bible_era: Era::OldTestament,
        region: "Jerusalem".into(),
        kind: DiscoveryType::Altar,
        source_link: String::new(),
        image_url: None,
    }
}

fn filtered(era: Option<Era>, region: Option<&str>) -> DiscoveryQuery {
    DiscoveryQuery::Filtered(FilterParams {
        bible_era: era,
        region: region.map(str::to_string),
        kind: None,
        query: None,
    })
}

fn controller(api: ScriptedApi, token: Option<&str>) -> (Arc<ScriptedApi>, MapController<ScriptedApi>) {
    let api = Arc::new(api);
    let store = token.map_or_else(MemoryStore::new, |token| MemoryStore::with_token(token));
    let session = Session::load(Box::new(store));
    (Arc::clone(&api), MapController::new(api, session, WINDOW))
}

async fn loaded(api: ScriptedApi, token: Option<&str>) -> (Arc<ScriptedApi>, MapController<ScriptedApi>) {
    let (api, mut map) = controller(
        api.route(
            DiscoveryQuery::All,
            0,
            Reply::List(vec![site("1", "Tunnel"), site("2", "Pool of Siloam")]),
        ),
        token,
    );
    map.clear_filters();
    map.run_until_idle().await;
    (api, map)
}

#[tokio::test(start_paused = true)]
async fn slow_older_response_cannot_overwrite_newer() {
    let api = ScriptedApi::default()
        .route(
            filtered(Some(Era::OldTestament), None),
            500,
            Reply::List(vec![site("1", "stale")]),
        )
        .route(
            filtered(Some(Era::OldTestament), Some("Egypt")),
            50,
            Reply::List(vec![site("2", "fresh")]),
        );
    let (_, mut map) = controller(api, None);

    let first = map.select_era("Old Testament").unwrap();
    let second = map.select_region("Egypt");
    let events = map.run_until_idle().await;

    assert_eq!(
        events,
        vec![
            MapEvent::Settled(Settled::Applied(1)),
            MapEvent::Settled(Settled::Stale {
                generation: first.generation(),
                latest: second.generation(),
            }),
        ]
    );
    assert_eq!(map.view().discoveries()[0].title, "fresh");
}

#[tokio::test(start_paused = true)]
async fn slow_newest_response_still_wins() {
    let api = ScriptedApi::default()
        .route(
            filtered(Some(Era::OldTestament), None),
            20,
            Reply::List(vec![site("1", "superseded")]),
        )
        .route(
            filtered(Some(Era::OldTestament), Some("Egypt")),
            400,
            Reply::List(vec![site("2", "latest"), site("3", "latest")]),
        );
    let (_, mut map) = controller(api, None);

    map.select_era("ot").unwrap();
    map.select_region("Egypt");
    let events = map.run_until_idle().await;

    assert!(matches!(events[0], MapEvent::Settled(Settled::Stale { .. })));
    assert_eq!(events[1], MapEvent::Settled(Settled::Applied(2)));
    assert!(map.view().discoveries().iter().all(|d| d.title == "latest"));
}

#[tokio::test(start_paused = true)]
async fn keystrokes_collapse_into_one_search() {
    let (api, mut map) = controller(
        ScriptedApi::default().route(
            DiscoveryQuery::from_search("tem"),
            10,
            Reply::List(vec![site("5", "Temple Mount")]),
        ),
        None,
    );

    for text in ["t", "te", "tem "] {
        map.type_search(text);
        tokio::time::advance(Duration::from_millis(100)).await;
    }
    let events = map.run_until_idle().await;

    assert_eq!(
        events,
        vec![
            MapEvent::SearchSettled("tem ".into()),
            MapEvent::Settled(Settled::Applied(1)),
        ]
    );
    assert_eq!(api.reads(), vec![DiscoveryQuery::from_search("tem")]);
}

#[tokio::test(start_paused = true)]
async fn retyping_the_settled_text_issues_nothing() {
    let (api, mut map) = controller(ScriptedApi::default(), None);
    map.type_search("x");
    map.type_search("");
    assert!(map.run_until_idle().await.is_empty());
    assert!(api.reads().is_empty());
}

#[tokio::test(start_paused = true)]
async fn search_keeps_active_filters() {
    let (api, mut map) = controller(ScriptedApi::default(), None);
    map.select_kind("Scroll").unwrap();
    map.run_until_idle().await;

    map.type_search("qumran");
    map.run_until_idle().await;

    assert_eq!(
        api.reads().last(),
        Some(&DiscoveryQuery::Filtered(FilterParams {
            bible_era: None,
            region: None,
            kind: Some(DiscoveryType::Scroll),
            query: Some("qumran".into()),
        }))
    );
}

#[tokio::test(start_paused = true)]
async fn invalid_selection_issues_no_request() {
    let (api, mut map) = controller(ScriptedApi::default(), None);
    assert!(map.select_era("Iron Age").is_err());
    assert!(map.is_idle());
    assert!(api.reads().is_empty());
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_degrades_to_no_data() {
    let (_, mut map) = loaded(
        ScriptedApi::default().route(filtered(None, Some("Sudan")), 0, Reply::Status(502)),
        None,
    )
    .await;
    assert_eq!(map.view().discoveries().len(), 2);

    map.select_region("Sudan");
    let events = map.run_until_idle().await;

    assert!(matches!(events[0], MapEvent::Settled(Settled::Failed(_))));
    assert!(map.view().discoveries().is_empty());
}

#[tokio::test(start_paused = true)]
async fn popup_toggles_marker_icon() {
    let (_, mut map) = loaded(ScriptedApi::default(), Some(ADMIN_TOKEN)).await;
    let id = DiscoveryId::new("2");

    let detail = map.open_popup(&id).unwrap();
    assert!(detail.editable);
    assert_eq!(detail.title, "Pool of Siloam");
    assert_eq!(map.view().marker_list()[1].icon, MarkerIcon::dot());
    assert!(matches!(
        map.view().marker_list()[0].icon,
        MarkerIcon::Label { .. }
    ));

    map.close_popup(&id);
    assert_eq!(
        map.view().marker_list()[1].icon,
        MarkerIcon::label("Pool of Siloam")
    );
    assert!(map.open_popup(&DiscoveryId::new("missing")).is_none());
}

#[tokio::test(start_paused = true)]
async fn anonymous_popup_is_not_editable() {
    let (_, mut map) = loaded(ScriptedApi::default(), None).await;
    assert!(!map.open_popup(&DiscoveryId::new("1")).unwrap().editable);
}

#[tokio::test(start_paused = true)]
async fn successful_save_patches_list_and_closes() {
    let (api, mut map) = loaded(ScriptedApi::default(), Some(ADMIN_TOKEN)).await;
    let id = DiscoveryId::new("1");

    map.edit(&id).unwrap();
    map.panel_mut().set_field(Field::Title, "Hezekiah's Tunnel").unwrap();
    map.panel_mut().set_field(Field::Latitude, "31.7771").unwrap();
    map.save().await.unwrap();

    assert_eq!(map.panel().state(), &PanelState::Closed);
    let patched = map.view().discovery(&id).unwrap();
    assert_eq!(patched.title, "Hezekiah's Tunnel");
    assert!((patched.latitude - 31.7771).abs() < f64::EPSILON);
    assert_eq!(api.updates.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn rejected_save_leaves_list_and_shows_failure() {
    let api = ScriptedApi {
        reject_mutations: true,
        ..ScriptedApi::default()
    };
    let (_, mut map) = loaded(api, Some(ADMIN_TOKEN)).await;
    let id = DiscoveryId::new("1");

    map.edit(&id).unwrap();
    map.panel_mut().set_field(Field::Title, "Renamed").unwrap();
    map.save().await.unwrap();

    match map.panel().state() {
        PanelState::Failed {
            operation, message, ..
        } => {
            assert_eq!(*operation, Operation::Save);
            assert!(message.contains("403"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(map.view().discovery(&id).unwrap().title, "Tunnel");
}

#[tokio::test(start_paused = true)]
async fn anonymous_save_fails_before_sending() {
    let (api, mut map) = loaded(ScriptedApi::default(), None).await;
    map.edit(&DiscoveryId::new("1")).unwrap();
    map.save().await.unwrap();

    assert!(matches!(map.panel().state(), PanelState::Failed { .. }));
    assert!(api.updates.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn blank_title_cannot_be_saved() {
    let (api, mut map) = loaded(ScriptedApi::default(), Some(ADMIN_TOKEN)).await;
    map.edit(&DiscoveryId::new("1")).unwrap();
    map.panel_mut().set_field(Field::Title, "   ").unwrap();

    assert_eq!(map.save().await, Err(PanelError::SaveDisabled));
    assert!(api.updates.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn delete_goes_through_confirmation() {
    let (api, mut map) = loaded(ScriptedApi::default(), Some(ADMIN_TOKEN)).await;
    let id = DiscoveryId::new("2");
    map.edit(&id).unwrap();

    assert_eq!(map.delete().await, Err(PanelError::NotConfirming));
    assert!(api.deletes.lock().unwrap().is_empty());

    map.panel_mut().request_delete().unwrap();
    map.delete().await.unwrap();

    assert_eq!(api.deletes.lock().unwrap().as_slice(), &[id.clone()]);
    assert!(map.view().discovery(&id).is_none());
    assert_eq!(map.panel().state(), &PanelState::Closed);
}

#[tokio::test(start_paused = true)]
async fn editing_unknown_id_is_rejected() {
    let (_, mut map) = loaded(ScriptedApi::default(), Some(ADMIN_TOKEN)).await;
    assert!(matches!(
        map.edit(&DiscoveryId::new("404")),
        Err(PanelError::InvalidField(_))
    ));
    assert!(!map.panel().is_open());
}
