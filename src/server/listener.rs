//! Listener setup module

use socket2::{Domain, Protocol, Socket, Type};
use std::net::{SocketAddr, TcpListener};

/// Create a blocking `TcpListener` with `SO_REUSEPORT` and `SO_REUSEADDR`
///
/// Reuse flags let the process rebind immediately after a restart instead of
/// waiting out `TIME_WAIT` sockets from the previous run.
pub fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_port(true)?;
    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_ephemeral_port() {
        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        assert_eq!(
            listener.local_addr().unwrap().ip().to_string(),
            "127.0.0.1"
        );
    }

    #[test]
    fn test_rebind_same_port_allowed() {
        let addr: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let first = create_listener(addr).unwrap();
        let bound = first.local_addr().unwrap();
        // With reuse flags a second bind on the same port must succeed.
        let second = create_listener(bound);
        assert!(second.is_ok());
    }
}
