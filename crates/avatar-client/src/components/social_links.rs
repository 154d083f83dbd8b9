use yew::prelude::*;
use yew_icons::{Icon, IconData};

pub const TELEGRAM_URL: &str = "https://t.me/bnbmubarak";
pub const TWITTER_URL: &str = "https://x.com/mubarak_cto";

#[function_component(SocialLinks)]
pub fn social_links() -> Html {
    html! {
        <nav class="social-links">
            <a href={TELEGRAM_URL} target="_blank" rel="noopener noreferrer" class="social-link">
                <Icon data={IconData::LUCIDE_SEND} width="16" height="16" />
                <span>{ "Telegram" }</span>
            </a>
            <a href={TWITTER_URL} target="_blank" rel="noopener noreferrer" class="social-link">
                <Icon data={IconData::LUCIDE_TWITTER} width="16" height="16" />
                <span>{ "Twitter" }</span>
            </a>
        </nav>
    }
}
