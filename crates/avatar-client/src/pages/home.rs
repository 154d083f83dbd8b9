//! Landing page: token info bar and the avatar editor.

use yew::prelude::*;
use yew_icons::{Icon, IconData};

use crate::components::{CopyButton, ImageEditor, SocialLinks};

const CONTRACT_ADDRESS: &str = "0x5c85d6c6825ab4032337f11ee92a72df936b46f6";
const BUY_URL: &str = "https://pancakeswap.finance/?outputCurrency=0x5C85D6C6825aB4032337F11Ee92a72DF936b46F6&inputCurrency=BNB";
const CREDIT_URL: &str = "https://x.com/WTFAcademy_";

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let on_export = Callback::from(|()| {
        tracing::info!("Avatar exported");
    });

    html! {
        <main class="page home-page">
            <div class="token-info">
                <div class="token-header">
                    <h1 class="token-title">{ "$Mubarak" }</h1>
                    <div class="token-actions">
                        <span class="token-badge">{ "مبارك / MUBARAK" }</span>
                        <a href={BUY_URL} target="_blank" rel="noopener noreferrer" class="buy-btn">
                            <Icon data={IconData::LUCIDE_EXTERNAL_LINK} width="12" height="12" />
                            { "BUY NOW" }
                        </a>
                    </div>
                </div>

                <div class="info-bar">
                    <div class="contract">
                        <span class="contract-label">{ "CONTRACT:" }</span>
                        <code class="contract-address">{ CONTRACT_ADDRESS }</code>
                        <CopyButton value={CONTRACT_ADDRESS} />
                    </div>
                    <SocialLinks />
                </div>
            </div>

            <div class="editor-section">
                <ImageEditor {on_export} />
            </div>

            <footer class="credit">
                { "Built by " }
                <a href={CREDIT_URL} target="_blank" rel="noopener noreferrer">{ "WTF Academy" }</a>
                { " Team" }
            </footer>
        </main>
    }
}
