// SPDX-License-Identifier: MPL-2.0

use crate::api::ApiError;
use crate::chain::{ChainMessage, DependencyChain, FetchTicket, LoadOutcome};
use crate::config::{Config, Role};
use crate::fl;
use crate::forms::FormKind;
use crate::helpers::{self, Overview};
use crate::pages;
use cosmic::app::context_drawer;
use cosmic::cosmic_config::{self, CosmicConfigEntry};
use cosmic::iced::{Length, Subscription};
use cosmic::prelude::*;
use cosmic::widget::{self, about::About, icon, menu, nav_bar};
use std::collections::HashMap;

const REPOSITORY: &str = env!("CARGO_PKG_REPOSITORY");
const APP_ICON: &[u8] = include_bytes!("../resources/icons/hicolor/scalable/apps/icon.svg");

/// The application model stores app-specific state used to describe its interface and
/// drive its logic.
pub struct AppModel {
    /// Application state which is managed by the COSMIC runtime.
    core: cosmic::Core,
    /// Display a context drawer with the designated page if defined.
    context_page: ContextPage,
    /// The about page for this app.
    about: About,
    /// Contains items assigned to the nav bar panel.
    nav: nav_bar::Model,
    /// Key bindings for the application's menu bar.
    key_binds: HashMap<menu::KeyBind, MenuAction>,
    /// Configuration data that persists between application runs.
    pub config: Config,
    /// Cosmic config context for saving
    config_context: Option<cosmic_config::Config>,

    // === Forms ===
    /// course → chapter → content
    pub course_content: DependencyChain,
    /// organization → program → semester → student
    pub enrollment: DependencyChain,

    // === Dashboard ===
    pub connection_status: ConnectionStatus,
    /// Last dashboard counts
    pub overview: Option<Overview>,

    // === Settings inputs (before saving) ===
    pub api_url_input: String,
    pub auth_token_input: String,
    pub role_input: Role,
    pub settings_status: SettingsStatus,

    /// Active notifications to display
    pub notifications: Vec<Notification>,
    /// Counter for generating unique notification IDs
    pub notification_id_counter: u32,
}

#[derive(Debug, Clone, Default)]
pub enum SettingsStatus {
    #[default]
    Idle,
    Saved,
    Error(String),
}

#[derive(Debug, Clone, Default)]
pub enum ConnectionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error(String),
}

/// Notification level/type
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NotificationLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A notification message to display to the user
#[derive(Debug, Clone)]
pub struct Notification {
    pub id: u32,
    pub level: NotificationLevel,
    pub title: String,
    pub message: String,
}

/// Messages emitted by the application and its widgets.
#[derive(Debug, Clone)]
pub enum Message {
    // Navigation & UI
    LaunchUrl(String),
    ToggleContextPage(ContextPage),
    UpdateConfig(Config),

    // Settings inputs
    ApiUrlChanged(String),
    AuthTokenChanged(String),
    RoleSelected(Role),
    SaveSettings,

    // Connection & dashboard
    TestConnection,
    ConnectionResult(Result<(), ApiError>),
    FetchOverview,
    OverviewLoaded(Result<Overview, ApiError>),

    // Forms
    Form(FormKind, ChainMessage),
    OptionsLoaded {
        form: FormKind,
        ticket: FetchTicket,
        result: Result<serde_json::Value, ApiError>,
    },
    ResetForm(FormKind),

    // Notifications
    AddNotification(NotificationLevel, String, String),
    DismissNotification(u32),
    CopyNotification(u32),
}

/// Create a COSMIC application from the app model
impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = "dev.hojjatabdollahi.Lectern";

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application with any given flags and startup commands.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        // Create the about widget
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_svg_bytes(APP_ICON))
            .version(env!("CARGO_PKG_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        // Load configuration
        let config_context = cosmic_config::Config::new(Self::APP_ID, Config::VERSION).ok();
        let config = config_context
            .as_ref()
            .map(|context| match Config::get_entry(context) {
                Ok(config) => config,
                Err((errors, config)) => {
                    for error in errors {
                        tracing::warn!(%error, "invalid config entry, using default");
                    }
                    config
                }
            })
            .unwrap_or_default();

        let mut app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            nav: nav_bar::Model::default(),
            key_binds: HashMap::new(),
            api_url_input: config.api_url.clone(),
            auth_token_input: config.auth_token.clone(),
            role_input: config.role,
            config,
            config_context,
            course_content: FormKind::CourseContent.chain(),
            enrollment: FormKind::Enrollment.chain(),
            connection_status: ConnectionStatus::Disconnected,
            overview: None,
            settings_status: SettingsStatus::Idle,
            notifications: Vec::new(),
            notification_id_counter: 0,
        };
        app.rebuild_nav();

        // Set the window title and load the dashboard counts.
        let command = cosmic::task::batch(vec![
            app.update_title(),
            app.update(Message::FetchOverview),
        ]);

        (app, command)
    }

    /// Elements to pack at the start of the header bar.
    fn header_start(&self) -> Vec<Element<'_, Self::Message>> {
        let menu_bar = menu::bar(vec![menu::Tree::with_children(
            menu::root(fl!("view")).apply(Element::from),
            menu::items(
                &self.key_binds,
                vec![menu::Item::Button(fl!("about"), None, MenuAction::About)],
            ),
        )]);

        vec![menu_bar.into()]
    }

    /// Enables the COSMIC application to create a nav bar with this model.
    fn nav_model(&self) -> Option<&nav_bar::Model> {
        Some(&self.nav)
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
        })
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        let space_s = cosmic::theme::spacing().space_s;
        let space_m = cosmic::theme::spacing().space_m;

        let page_content: Element<_> = match self.active_page() {
            Page::Dashboard => pages::dashboard::view(self, space_s, space_m),
            Page::CourseContent => pages::content::view(self, space_s, space_m),
            Page::Enrollment => pages::enrollment::view(self, space_s, space_m),
            Page::Settings => pages::settings::view(self, space_s, space_m),
        };

        // Build view with notifications at the top if any
        let mut content_column = widget::column::with_capacity(2).spacing(space_s);

        if !self.notifications.is_empty() {
            let notifications_row = widget::row::with_children(
                self.notifications
                    .iter()
                    .map(pages::widgets::notification_toast),
            )
            .spacing(space_s);
            content_column = content_column.push(notifications_row);
        }

        content_column = content_column.push(page_content);

        widget::container(content_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(space_m)
            .into()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        // Watch for application configuration changes.
        self.core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config))
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        match message {
            Message::ToggleContextPage(context_page) => {
                if self.context_page == context_page {
                    self.core.window.show_context = !self.core.window.show_context;
                } else {
                    self.context_page = context_page;
                    self.core.window.show_context = true;
                }
            }

            Message::UpdateConfig(config) => {
                if config != self.config {
                    return self.apply_config(config);
                }
            }

            Message::LaunchUrl(url) => {
                if let Err(err) = open::that_detached(&url) {
                    tracing::warn!(%url, %err, "failed to open url");
                }
            }

            // Settings inputs
            Message::ApiUrlChanged(url) => {
                self.api_url_input = url;
                self.settings_status = SettingsStatus::Idle;
            }

            Message::AuthTokenChanged(token) => {
                self.auth_token_input = token;
                self.settings_status = SettingsStatus::Idle;
            }

            Message::RoleSelected(role) => {
                self.role_input = role;
                self.settings_status = SettingsStatus::Idle;
            }

            Message::SaveSettings => {
                let config = Config {
                    api_url: self.api_url_input.trim().to_string(),
                    auth_token: self.auth_token_input.trim().to_string(),
                    role: self.role_input,
                };

                if let Some(ref context) = self.config_context
                    && let Err(e) = config.write_entry(context)
                {
                    tracing::error!(error = %e, "failed to save config");
                    self.settings_status = SettingsStatus::Error(e.to_string());
                    self.add_notification(
                        NotificationLevel::Error,
                        fl!("error"),
                        format!("{}: {}", fl!("save-failed"), e),
                    );
                    return Task::none();
                }

                self.settings_status = SettingsStatus::Saved;
                self.add_notification(NotificationLevel::Success, fl!("settings-saved"), String::new());
                return self.apply_config(config);
            }

            Message::TestConnection => {
                self.connection_status = ConnectionStatus::Connecting;
                let url = self.api_url_input.trim().to_string();
                let token = self.auth_token_input.trim().to_string();
                let Some(endpoint) = self.course_content.spec(0).map(|spec| spec.endpoint) else {
                    return Task::none();
                };

                return cosmic::task::future(async move {
                    let result = helpers::test_connection(&url, &token, endpoint).await;
                    cosmic::Action::App(Message::ConnectionResult(result))
                });
            }

            Message::ConnectionResult(result) => match result {
                Ok(()) => {
                    self.connection_status = ConnectionStatus::Connected;
                    self.add_notification(
                        NotificationLevel::Success,
                        fl!("status-connected"),
                        String::new(),
                    );
                }
                Err(e) => {
                    self.connection_status = ConnectionStatus::Error(e.to_string());
                    self.add_notification(NotificationLevel::Error, fl!("status-error"), e.to_string());
                }
            },

            Message::FetchOverview => {
                let (Some(courses), Some(organizations)) = (
                    self.course_content.spec(0).cloned(),
                    self.enrollment.spec(0).cloned(),
                ) else {
                    return Task::none();
                };
                self.connection_status = ConnectionStatus::Connecting;
                let url = self.config.api_url.clone();
                let token = self.config.bearer_token().unwrap_or_default().to_string();

                return cosmic::task::future(async move {
                    let result = helpers::fetch_overview(&url, &token, courses, organizations).await;
                    cosmic::Action::App(Message::OverviewLoaded(result))
                });
            }

            Message::OverviewLoaded(result) => match result {
                Ok(overview) => {
                    self.connection_status = match (&overview.courses, &overview.organizations) {
                        (Err(e), _) | (_, Err(e)) if e.is_transport() => {
                            ConnectionStatus::Error(e.to_string())
                        }
                        _ => ConnectionStatus::Connected,
                    };
                    self.overview = Some(overview);
                }
                Err(e) => {
                    self.overview = None;
                    self.connection_status = ConnectionStatus::Error(e.to_string());
                }
            },

            // Forms
            Message::Form(form, chain_message) => {
                return self.handle_chain_message(form, chain_message);
            }

            Message::OptionsLoaded {
                form,
                ticket,
                result,
            } => {
                let mut failures = Vec::new();
                let outcome = self.chain_mut(form).finish_load(&ticket, result, |spec, error| {
                    failures.push((spec.title.clone(), error.clone()));
                });
                match outcome {
                    LoadOutcome::Applied { count } => {
                        tracing::debug!(?form, level = ticket.level(), count, "options applied");
                    }
                    LoadOutcome::Stale => {
                        tracing::debug!(?form, level = ticket.level(), "options superseded");
                    }
                    LoadOutcome::Failed(_) => {}
                }

                for (level, error) in failures {
                    let title = if error.is_transport() {
                        fl!("options-unavailable", level = level)
                    } else {
                        fl!("options-malformed", level = level)
                    };
                    self.add_notification(NotificationLevel::Error, title, error.to_string());
                }
            }

            Message::ResetForm(form) => {
                let chain = self.chain_mut(form);
                chain.reset();
                if let Some(ticket) = chain.load_roots() {
                    return self.fetch_options(form, ticket);
                }
            }

            // Notifications
            Message::AddNotification(level, title, message) => {
                self.add_notification(level, title, message);
            }

            Message::DismissNotification(id) => {
                self.notifications.retain(|n| n.id != id);
            }

            Message::CopyNotification(id) => {
                if let Some(notification) = self.notifications.iter().find(|n| n.id == id) {
                    let text = format!("{}: {}", notification.title, notification.message);
                    return cosmic::task::future(async move {
                        let copied = arboard::Clipboard::new()
                            .and_then(|mut clipboard| clipboard.set_text(text));
                        let message = match copied {
                            Ok(()) => Message::AddNotification(
                                NotificationLevel::Info,
                                fl!("notification-copied"),
                                String::new(),
                            ),
                            Err(e) => Message::AddNotification(
                                NotificationLevel::Warning,
                                fl!("copy-failed"),
                                e.to_string(),
                            ),
                        };
                        cosmic::Action::App(message)
                    });
                }
            }
        }
        Task::none()
    }

    /// Called when a nav item is selected.
    ///
    /// Leaving a form page drops its selections; entering one reloads its
    /// root options.
    fn on_nav_select(&mut self, id: nav_bar::Id) -> Task<cosmic::Action<Self::Message>> {
        let previous = self.active_page();
        self.nav.activate(id);
        let current = self.active_page();

        let mut tasks = vec![self.update_title()];
        if previous != current {
            if let Some(form) = previous.form() {
                self.chain_mut(form).reset();
            }
            tasks.push(self.enter_page(current));
        }
        cosmic::task::batch(tasks)
    }
}

impl AppModel {
    /// Updates the header and window titles.
    pub fn update_title(&mut self) -> Task<cosmic::Action<Message>> {
        let mut window_title = fl!("app-title");

        if let Some(page) = self.nav.text(self.nav.active()) {
            window_title.push_str(" - ");
            window_title.push_str(page);
        }

        if let Some(id) = self.core.main_window_id() {
            self.set_window_title(window_title, id)
        } else {
            Task::none()
        }
    }

    /// The page shown in the main area.
    pub fn active_page(&self) -> Page {
        self.nav
            .active_data::<Page>()
            .copied()
            .unwrap_or_default()
    }

    pub fn chain(&self, form: FormKind) -> &DependencyChain {
        match form {
            FormKind::CourseContent => &self.course_content,
            FormKind::Enrollment => &self.enrollment,
        }
    }

    fn chain_mut(&mut self, form: FormKind) -> &mut DependencyChain {
        match form {
            FormKind::CourseContent => &mut self.course_content,
            FormKind::Enrollment => &mut self.enrollment,
        }
    }

    /// Rebuilds the nav bar for the configured role, keeping the active page
    /// when it is still visible.
    fn rebuild_nav(&mut self) {
        let active = self.nav.active_data::<Page>().copied();
        let pages = Page::visible_to(self.config.role);
        let keep = active.filter(|page| pages.contains(page));

        self.nav.clear();
        for page in pages {
            let item = self
                .nav
                .insert()
                .text(page.title())
                .data::<Page>(page)
                .icon(icon::from_name(page.icon_name()));
            if keep.map_or(page == Page::Dashboard, |kept| kept == page) {
                item.activate();
            }
        }
    }

    /// Applies a new configuration: resets every form and rebuilds the nav.
    fn apply_config(&mut self, config: Config) -> Task<cosmic::Action<Message>> {
        tracing::info!(api_url = %config.api_url, role = config.role.as_str(), "configuration changed");
        self.config = config;
        self.api_url_input = self.config.api_url.clone();
        self.auth_token_input = self.config.auth_token.clone();
        self.role_input = self.config.role;
        self.overview = None;
        self.connection_status = ConnectionStatus::Disconnected;

        self.course_content.reset();
        self.enrollment.reset();
        self.rebuild_nav();

        let page = self.active_page();
        cosmic::task::batch(vec![self.update_title(), self.enter_page(page)])
    }

    /// Loads whatever data `page` shows when it becomes active.
    fn enter_page(&mut self, page: Page) -> Task<cosmic::Action<Message>> {
        match page.form() {
            Some(form) => match self.chain_mut(form).load_roots() {
                Some(ticket) => self.fetch_options(form, ticket),
                None => Task::none(),
            },
            None if page == Page::Dashboard => self.update(Message::FetchOverview),
            None => Task::none(),
        }
    }

    fn handle_chain_message(
        &mut self,
        form: FormKind,
        message: ChainMessage,
    ) -> Task<cosmic::Action<Message>> {
        let chain = self.chain_mut(form);
        let started = match message {
            ChainMessage::Select { level, option } => chain.select_at(level, option),
            ChainMessage::Retry { level } => chain.retry(level),
        };

        match started {
            Ok(Some(ticket)) => self.fetch_options(form, ticket),
            Ok(None) => Task::none(),
            Err(e) => {
                tracing::warn!(?form, error = %e, "ignoring chain message");
                Task::none()
            }
        }
    }

    /// Spawns the request for `ticket`; the response comes back as
    /// [`Message::OptionsLoaded`].
    fn fetch_options(&self, form: FormKind, ticket: FetchTicket) -> Task<cosmic::Action<Message>> {
        let Some(endpoint) = self.chain(form).spec(ticket.level()).map(|spec| spec.endpoint) else {
            return Task::none();
        };
        let url = self.config.api_url.clone();
        let token = self.config.bearer_token().unwrap_or_default().to_string();
        let parent = ticket.parent().map(ToString::to_string);

        cosmic::task::future(async move {
            let result = helpers::fetch_options(&url, &token, endpoint, parent).await;
            cosmic::Action::App(Message::OptionsLoaded {
                form,
                ticket,
                result,
            })
        })
    }

    fn add_notification(&mut self, level: NotificationLevel, title: String, message: String) {
        self.notification_id_counter += 1;
        self.notifications.push(Notification {
            id: self.notification_id_counter,
            level,
            title,
            message,
        });
    }
}

/// The page to display in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    CourseContent,
    Enrollment,
    Settings,
}

impl Page {
    pub const ALL: [Page; 4] = [
        Page::Dashboard,
        Page::CourseContent,
        Page::Enrollment,
        Page::Settings,
    ];

    /// Whether `role` sees this page in the nav bar.
    pub fn allows(self, role: Role) -> bool {
        match self {
            Page::Enrollment => matches!(role, Role::Admin | Role::Teacher),
            Page::Dashboard | Page::CourseContent | Page::Settings => true,
        }
    }

    /// Pages shown to `role`, in nav order.
    pub fn visible_to(role: Role) -> Vec<Page> {
        Self::ALL.into_iter().filter(|page| page.allows(role)).collect()
    }

    /// The form hosted by this page, if any.
    pub fn form(self) -> Option<FormKind> {
        match self {
            Page::CourseContent => Some(FormKind::CourseContent),
            Page::Enrollment => Some(FormKind::Enrollment),
            Page::Dashboard | Page::Settings => None,
        }
    }

    fn title(self) -> String {
        match self {
            Page::Dashboard => fl!("dashboard"),
            Page::CourseContent => fl!("course-content"),
            Page::Enrollment => fl!("enrollment"),
            Page::Settings => fl!("settings"),
        }
    }

    fn icon_name(self) -> &'static str {
        match self {
            Page::Dashboard => "utilities-system-monitor-symbolic",
            Page::CourseContent => "accessories-dictionary-symbolic",
            Page::Enrollment => "system-users-symbolic",
            Page::Settings => "preferences-system-symbolic",
        }
    }
}

/// The context page to display in the context drawer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ContextPage {
    #[default]
    About,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MenuAction {
    About,
}

impl menu::action::MenuAction for MenuAction {
    type Message = Message;

    fn message(&self) -> Self::Message {
        match self {
            MenuAction::About => Message::ToggleContextPage(ContextPage::About),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_gating() {
        assert_eq!(Page::visible_to(Role::Admin), Page::ALL.to_vec());
        assert_eq!(Page::visible_to(Role::Teacher), Page::ALL.to_vec());
        assert_eq!(
            Page::visible_to(Role::Student),
            vec![Page::Dashboard, Page::CourseContent, Page::Settings]
        );
    }

    #[test]
    fn test_pages_host_forms() {
        assert_eq!(Page::CourseContent.form(), Some(FormKind::CourseContent));
        assert_eq!(Page::Enrollment.form(), Some(FormKind::Enrollment));
        assert_eq!(Page::Dashboard.form(), None);
        assert_eq!(Page::Settings.form(), None);
    }

    #[test]
    fn test_default_page_is_always_visible() {
        for role in Role::ALL {
            assert!(Page::default().allows(role));
        }
    }
}
