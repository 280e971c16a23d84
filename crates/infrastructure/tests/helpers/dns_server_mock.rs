#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock server answers each datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Echo the question and append one A record for 93.184.216.34.
    AnswerA,
    /// Echo the question with RCODE=NXDOMAIN and no answers.
    NxDomain,
    /// Echo the question with RCODE=SERVFAIL.
    ServFail,
    /// Never reply.
    Silent,
    /// Reply with a datagram that fills a 4096-byte buffer.
    Oversized,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let local_addr = socket.local_addr()?;
        let received = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&received);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            log.lock().unwrap().push(buf[..len].to_vec());
                            if let Some(response) = Self::build_mock_response(behavior, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr: local_addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Every datagram the server has seen, in arrival order.
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }

    fn build_mock_response(behavior: MockBehavior, query: &[u8]) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let (rcode, answers) = match behavior {
            MockBehavior::Silent => return None,
            MockBehavior::Oversized => return Some(vec![0u8; 4096]),
            MockBehavior::AnswerA => (0x00, 1u8),
            MockBehavior::NxDomain => (0x03, 0),
            MockBehavior::ServFail => (0x02, 0),
        };

        let mut response = Vec::with_capacity(512);

        // ID
        response.extend_from_slice(&query[0..2]);
        // QR + RD, RA + RCODE
        response.push(0x81);
        response.push(0x80 | rcode);
        // QDCOUNT
        response.extend_from_slice(&query[4..6]);
        // ANCOUNT, NSCOUNT, ARCOUNT
        response.extend_from_slice(&[0x00, answers, 0x00, 0x00, 0x00, 0x00]);

        if query.len() > 12 {
            response.extend_from_slice(&query[12..]);
        }

        if answers == 1 {
            response.extend_from_slice(&[
                0xc0, 0x0c, // pointer to the question name
                0x00, 0x01, // TYPE A
                0x00, 0x01, // CLASS IN
                0x00, 0x00, 0x00, 0x3c, // TTL 60
                0x00, 0x04, // RDLENGTH
                93, 184, 216, 34,
            ]);
        }

        Some(response)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// An address nobody listens on: bound once to get a free port, then released.
pub async fn closed_udp_port() -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket.local_addr().unwrap()
}
